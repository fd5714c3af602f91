// imgbb uploader: a small blocking HTTP client that sends the rendered
// banner as a base64 form field and returns the hosted URL.
//
// imgbb answers with a gzip body, and this client always gunzips it
// whatever `Content-Encoding` says. reqwest's own gzip feature is left off
// so the raw bytes reach `read_link` untouched.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::{multipart, Client};
use reqwest::header::{ACCEPT, ACCEPT_ENCODING, CACHE_CONTROL, CONNECTION};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::UploadError;

/// Response body shape; only `data.url` is used.
#[derive(Deserialize, Debug)]
pub struct LinkImage {
    pub data: LinkData,
}

#[derive(Deserialize, Debug)]
pub struct LinkData {
    pub url: String,
}

/// Blocking client bound to one endpoint and API key.
#[derive(Clone)]
pub struct ImgbbClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ImgbbClient {
    /// Build a client without timeouts or retries.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self, UploadError> {
        let client = Client::builder()
            .timeout(None)
            .build()
            .map_err(UploadError::Client)?;
        Ok(Self::with_client(client, endpoint, api_key))
    }

    /// Wrap an already configured reqwest client.
    pub fn with_client(
        client: Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        ImgbbClient {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, UploadError> {
        Self::new(config.endpoint.clone(), config.api_key.clone())
    }

    /// Upload the file at `path` and return the URL imgbb assigned to it.
    pub fn upload(&self, path: &Path) -> Result<String, UploadError> {
        let encoded = encode_file(path)?;
        debug!(path = %path.display(), encoded_len = encoded.len(), "encoded image");

        let form = multipart::Form::new().text("image", encoded);
        let request = self
            .client
            .post(&self.endpoint)
            .query(&[("key", &self.api_key)])
            .header(CACHE_CONTROL, "no-cache")
            .header(ACCEPT, "*/*")
            .header(ACCEPT_ENCODING, "gzip, deflate, br")
            .header(CONNECTION, "keep-alive")
            .multipart(form);

        let spinner = spinner("Uploading...");
        let sent = request.send();
        spinner.finish_and_clear();
        let response = sent.map_err(UploadError::Transport)?;

        info!(status = %response.status(), "upload response received");
        read_link(response)
    }
}

/// Read the whole file and return its padded standard base64 encoding.
pub fn encode_file(path: &Path) -> Result<String, UploadError> {
    let bytes = fs::read(path).map_err(|source| UploadError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(STANDARD.encode(bytes))
}

/// Gunzip `body` and pull `data.url` out of the JSON inside.
pub fn read_link<R: Read>(body: R) -> Result<String, UploadError> {
    let mut decoded = Vec::new();
    GzDecoder::new(body)
        .read_to_end(&mut decoded)
        .map_err(UploadError::Decompress)?;
    let link: LinkImage = serde_json::from_slice(&decoded).map_err(UploadError::Decode)?;
    Ok(link.data.url)
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn read_link_extracts_url() {
        let body = gzip(br#"{"data":{"url":"https://x/y.png","id":"abc"},"success":true}"#);
        assert_eq!(read_link(&body[..]).unwrap(), "https://x/y.png");
    }

    #[test]
    fn read_link_rejects_plain_json() {
        let err = read_link(&br#"{"data":{"url":"https://x/y.png"}}"#[..]).unwrap_err();
        assert!(matches!(err, UploadError::Decompress(_)));
    }

    #[test]
    fn read_link_rejects_malformed_json() {
        let body = gzip(b"{\"data\":");
        let err = read_link(&body[..]).unwrap_err();
        assert!(matches!(err, UploadError::Decode(_)));
    }

    #[test]
    fn read_link_requires_url_field() {
        let body = gzip(br#"{"data":{}}"#);
        let err = read_link(&body[..]).unwrap_err();
        assert!(matches!(err, UploadError::Decode(_)));
    }

    #[test]
    fn encode_file_is_reversible() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        let bytes: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        fs::write(&path, &bytes).unwrap();

        let encoded = encode_file(&path).unwrap();
        assert_eq!(STANDARD.decode(encoded).unwrap(), bytes);
    }

    #[test]
    fn encode_missing_file_fails() {
        let err = encode_file(Path::new("/nonexistent/banner.png")).unwrap_err();
        assert!(matches!(err, UploadError::ReadFile { .. }));
    }
}
