//! Error types for glyphview

use thiserror::Error;

/// Main error type for glyphview operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Column '{0}' not found in table")]
    MissingColumn(String),

    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown colormap: {0}")]
    UnknownColormap(String),

    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Layer '{0}' is already displayed")]
    DuplicateLayer(String),

    #[error("No layer labelled '{0}'")]
    UnknownLayer(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for glyphview operations
pub type Result<T> = std::result::Result<T, Error>;
