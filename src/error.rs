//! Error types for annotation conversion.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// The file could not be opened, read or written.
    #[error("Failed to access {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON, or JSON that does not match the export layout.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The projector was handed something other than a sequence of records.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A loader config file could not be parsed or failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ConvertError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Classify a serde_json failure on `path`: I/O errors while reading or
    /// writing are file access problems, everything else is a parse error.
    pub(crate) fn from_json(path: &Path, source: serde_json::Error) -> Self {
        if source.is_io() {
            ConvertError::file_access(path, source.into())
        } else {
            ConvertError::Parse(source)
        }
    }

    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        ConvertError::InvalidInput(msg.into())
    }
}
