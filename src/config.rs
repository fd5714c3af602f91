// Run configuration. Built once by the binary (see `cli`) and handed by
// reference to both the composer and the uploader, so tests can point a
// run at scratch paths and a local endpoint without touching the process
// environment.

use std::path::PathBuf;

use image::Rgba;

/// Default imgbb upload endpoint. The API key travels as the `key` query
/// parameter.
pub const IMGBB_UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

/// Everything a run needs, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the PNG is written and later read back for upload.
    pub output: PathBuf,
    /// Canvas fill colour.
    pub background: Rgba<u8>,
    /// Font for the right footer and the title.
    pub desc_font: PathBuf,
    /// Font for the left footer.
    pub title_font: PathBuf,
    pub right_subtitle: Option<String>,
    pub left_subtitle: Option<String>,
    pub api_key: String,
    pub endpoint: String,
}

impl Config {
    /// Build a config with the default endpoint and no preset subtitles.
    pub fn new(
        output: impl Into<PathBuf>,
        desc_font: impl Into<PathBuf>,
        title_font: impl Into<PathBuf>,
        api_key: impl Into<String>,
    ) -> Self {
        Config {
            output: output.into(),
            background: Rgba([0, 0, 0, 255]),
            desc_font: desc_font.into(),
            title_font: title_font.into(),
            right_subtitle: None,
            left_subtitle: None,
            api_key: api_key.into(),
            endpoint: IMGBB_UPLOAD_URL.to_string(),
        }
    }
}

/// Parse one colour channel the forgiving way: anything that is not an
/// integer becomes 0, and integers outside 0..=255 keep their low byte.
pub fn parse_channel(raw: &str) -> u8 {
    raw.trim().parse::<i64>().map(|v| v as u8).unwrap_or(0)
}

/// Treat a blank subtitle the same as a missing one.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_channel_accepts_plain_integers() {
        assert_eq!(parse_channel("0"), 0);
        assert_eq!(parse_channel("128"), 128);
        assert_eq!(parse_channel(" 255 "), 255);
    }

    #[test]
    fn parse_channel_defaults_to_zero() {
        assert_eq!(parse_channel(""), 0);
        assert_eq!(parse_channel("blue"), 0);
        assert_eq!(parse_channel("12.5"), 0);
    }

    #[test]
    fn parse_channel_truncates_out_of_range() {
        assert_eq!(parse_channel("256"), 0);
        assert_eq!(parse_channel("300"), 44);
        assert_eq!(parse_channel("-1"), 255);
    }

    #[test]
    fn blank_subtitle_is_missing() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("x".into())), Some("x".to_string()));
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn new_uses_imgbb_endpoint() {
        let config = Config::new("out.png", "a.ttf", "b.ttf", "k");
        assert_eq!(config.endpoint, IMGBB_UPLOAD_URL);
        assert!(config.right_subtitle.is_none());
    }
}
