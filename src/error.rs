//! Error types for unlayout library.

use std::io;
use thiserror::Error;

/// Result type alias for unlayout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rebuilding a document hierarchy.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON input or output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A recognized paragraph is missing required fields, or the
    /// sequence is not in reading order.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The source bytes are neither a PDF nor a supported image.
    #[error("Unsupported file format: not a PDF or supported image")]
    UnsupportedFormat,

    /// The declared content type of an upload is not accepted.
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// The layout-analysis service failed.
    #[error("Layout analysis error: {0}")]
    Analysis(String),

    /// Error during rendering (JSON, Markdown, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// HTTP status a transport layer should answer with for this error.
    ///
    /// Rejected uploads and malformed input are client errors (400);
    /// everything else is reported as an internal failure (500).
    pub fn status_code(&self) -> u16 {
        match self {
            Error::UnsupportedFormat
            | Error::UnsupportedContentType(_)
            | Error::InvalidInput(_) => 400,
            _ => 500,
        }
    }

    /// Check if the error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        self.status_code() == 400
    }
}
