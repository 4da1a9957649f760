//! Centralized error types for emlpdf.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the emlpdf library.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// I/O error with the associated file path.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// The specified input directory does not exist or is not a directory.
    #[error("Input directory not found: {0}")]
    InputDirNotFound(PathBuf),

    /// A structured header value could not be parsed.
    #[error("Header parse error: {0}")]
    HeaderParse(String),

    /// A multipart message declared no boundary parameter.
    #[error("Multipart message without boundary in '{0}'")]
    MissingBoundary(PathBuf),

    /// The character encoding named in an encoded-word is not supported.
    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    /// Base64 content could not be decoded.
    #[error("Invalid base64 content: {0}")]
    InvalidBase64(String),
}

/// Convenience alias for `Result<T, ExtractError>`.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Helper to convert a bare `std::io::Error` together with a path.
impl ExtractError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Allow `?` on `std::io::Error` inside functions returning `ExtractError`
/// when no path context is available (rare — prefer `ExtractError::io`).
impl From<std::io::Error> for ExtractError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<unknown>"),
            source,
        }
    }
}
