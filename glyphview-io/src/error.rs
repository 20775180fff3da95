//! Error types for I/O operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during I/O operations
#[derive(Error, Debug)]
pub enum IoError {
    #[error("Unsupported asset extension: {extension}")]
    UnsupportedExtension { extension: String },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Asset {} already belongs to '{owner}', cannot record it for '{label}'", path.display())]
    PathConflict {
        path: PathBuf,
        owner: String,
        label: String,
    },

    #[error("Encode error: {message}")]
    Encode { message: String },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IoError> for glyphview_core::Error {
    fn from(err: IoError) -> Self {
        match err {
            IoError::UnsupportedExtension { .. } => {
                glyphview_core::Error::UnsupportedFormat(err.to_string())
            }
            IoError::Write { path, source } => glyphview_core::Error::Io(std::io::Error::new(
                source.kind(),
                format!("{}: {}", path.display(), source),
            )),
            IoError::PathConflict { .. } => glyphview_core::Error::InvalidData(err.to_string()),
            IoError::Encode { .. } => glyphview_core::Error::Serialization(err.to_string()),
            IoError::Parse { .. } => glyphview_core::Error::InvalidData(err.to_string()),
            IoError::Io(source) => glyphview_core::Error::Io(source),
        }
    }
}
