//! Core error types for Flashgrab.

use thiserror::Error;

/// Core error type for Flashgrab operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The source URL could not be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Writing extracted records failed.
    #[error("Record sink failed: {0}")]
    Sink(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
