// Error types for the two phases of a run. The composer and the uploader
// each get their own enum so the binary can report which phase failed.
// Messages name the failed step only; the cause is reachable through
// `source()` and `main` prints the whole chain with `anyhow`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building the banner image.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("load font {}", .path.display())]
    LoadFont {
        path: PathBuf,
        #[source]
        source: FontSource,
    },
    #[error("save image {}", .path.display())]
    SaveImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("read prompt answer")]
    Prompt(#[source] io::Error),
}

/// Underlying cause of a font load failure: either the file could not be
/// read or its bytes are not a usable TrueType/OpenType font.
#[derive(Debug, Error)]
pub enum FontSource {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Invalid(#[from] ab_glyph::InvalidFont),
    #[error("font has no units-per-em table")]
    MissingMetrics,
}

/// Errors raised while sending the image to the hosting API.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("read image {}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("build http client")]
    Client(#[source] reqwest::Error),
    #[error("send upload request")]
    Transport(#[source] reqwest::Error),
    #[error("decompress response")]
    Decompress(#[source] io::Error),
    #[error("decode response")]
    Decode(#[source] serde_json::Error),
}
