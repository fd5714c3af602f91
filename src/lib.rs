// Library root
// ------------
// The binary (`main.rs`) is a thin driver over these modules.
//
// Module responsibilities:
// - `cli` / `config`: command line and environment parsing into one
//   `Config` value that is passed to both phases.
// - `canvas`: a small drawing context (fill, text, word wrap, PNG output).
// - `compose`: the fixed banner layout drawn with `canvas`.
// - `prompt`: interactive fallbacks for text the config does not supply.
// - `upload`: the imgbb client that turns the PNG into a public URL.
// - `logging`: tracing subscriber setup.
pub mod canvas;
pub mod cli;
pub mod compose;
pub mod config;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod upload;

pub use config::Config;
pub use error::{ComposeError, UploadError};
