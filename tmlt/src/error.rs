//! Error handling for the tmlt CLI.

use thiserror::Error;

/// Errors the tmlt tool can report.
#[derive(Error, Debug)]
pub enum TmltError {
    /// The input failed to parse.
    #[error("{0}")]
    Parse(#[from] tmlc_par::TomlError),

    /// A `--path` argument addressed nothing in the document.
    #[error("path not found: {0}")]
    PathNotFound(String),

    /// Reading stdin or writing stdout failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using TmltError.
pub type Result<T> = std::result::Result<T, TmltError>;
