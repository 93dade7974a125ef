//! Error types for draftmark.

use thiserror::Error;

/// Result type alias for draftmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting documents.
///
/// Most input variance degrades silently (unknown styles are dropped,
/// unmapped blocks become `unstyled`). Only input that leaves the converter
/// unable to produce anything sensible is reported.
#[derive(Error, Debug)]
pub enum Error {
    /// The input violates a structural precondition of the converter.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Error reading or writing the raw-content JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedInput(msg.into())
    }
}
