//! Store error types.

use flashgrab_core::CoreError;
use flashgrab_fetch::FetchError;
use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Artifact name rejected before touching the filesystem.
    #[error("Invalid artifact name: {0}")]
    InvalidName(String),

    /// Writing the spreadsheet failed.
    #[error("Spreadsheet error: {0}")]
    Sheet(#[from] rust_xlsxwriter::XlsxError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Returns true if the error is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

impl From<StoreError> for CoreError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Io(e) => CoreError::Io(e),
            other => CoreError::Sink(other.to_string()),
        }
    }
}

// ============================================================================
// Extraction Error
// ============================================================================

/// Failure of a whole extraction run.
///
/// The `Display` text is the reason reported to whoever asked for the run.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The source URL was rejected.
    #[error("Invalid source URL: {0}")]
    InvalidUrl(String),

    /// The fetch layer failed in a way that is not a plain empty page.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Writing the log or the spreadsheet failed.
    #[error("Storage failed: {0}")]
    Store(#[from] StoreError),
}

impl From<std::io::Error> for ExtractionError {
    fn from(error: std::io::Error) -> Self {
        ExtractionError::Store(StoreError::Io(error))
    }
}
