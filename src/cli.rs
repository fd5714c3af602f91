// Command line surface. Every setting can come from a flag or from the
// environment variable the tool has always used; `.env` is loaded by the
// binary before parsing so values there count as environment too.

use std::path::PathBuf;

use clap::Parser;
use image::Rgba;

use crate::config::{non_empty, parse_channel, Config, IMGBB_UPLOAD_URL};

#[derive(Parser, Debug)]
#[command(version, about = "Render a banner image and upload it to imgbb")]
pub struct Cli {
    /// Output PNG path, also the file that gets uploaded
    #[arg(long, env = "FILE_PATH")]
    pub file_path: PathBuf,
    /// Background red channel (0-255)
    #[arg(long, env = "R", default_value = "0")]
    pub red: String,
    /// Background green channel (0-255)
    #[arg(long, env = "G", default_value = "0")]
    pub green: String,
    /// Background blue channel (0-255)
    #[arg(long, env = "B", default_value = "0")]
    pub blue: String,
    /// Background alpha channel (0-255)
    #[arg(long, env = "A", default_value = "0")]
    pub alpha: String,
    /// Font used for the right footer and the title
    #[arg(long, env = "DESC_FONT")]
    pub desc_font: PathBuf,
    /// Font used for the left footer
    #[arg(long, env = "TITLE_FONT")]
    pub title_font: PathBuf,
    /// Right footer text; prompted for when empty
    #[arg(long, env = "RIGHT_SUBTITLE")]
    pub right_subtitle: Option<String>,
    /// Left footer text; prompted for when empty
    #[arg(long, env = "LEFT_SUBTITLE")]
    pub left_subtitle: Option<String>,
    /// imgbb API key
    #[arg(long, env = "BB_KEY", hide_env_values = true)]
    pub key: String,
    /// Upload endpoint
    #[arg(long, env = "BB_ENDPOINT", default_value = IMGBB_UPLOAD_URL)]
    pub endpoint: String,
    /// Enable debug logging
    #[arg(long, env = "BANNER_DEBUG")]
    pub debug: bool,
}

impl Cli {
    /// Resolve the parsed arguments into the run configuration.
    pub fn into_config(self) -> Config {
        Config {
            output: self.file_path,
            background: Rgba([
                parse_channel(&self.red),
                parse_channel(&self.green),
                parse_channel(&self.blue),
                parse_channel(&self.alpha),
            ]),
            desc_font: self.desc_font,
            title_font: self.title_font,
            right_subtitle: non_empty(self.right_subtitle),
            left_subtitle: non_empty(self.left_subtitle),
            api_key: self.key,
            endpoint: self.endpoint,
        }
    }
}
