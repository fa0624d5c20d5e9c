//! Fetch error types.

use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// The server answered with a non-success status.
    #[error("Unexpected status code: {0}")]
    Status(u16),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Writing records to the sink failed.
    #[error("Failed to store records: {0}")]
    Sink(#[from] flashgrab_core::CoreError),
}

impl FetchError {
    /// Returns true if this error might go away on a second attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Timeout(_) => true,
            FetchError::Http(e) => e.is_connect() || e.is_timeout(),
            FetchError::Status(code) => *code == 429 || *code >= 500,
            FetchError::InvalidUrl(_) | FetchError::Sink(_) => false,
        }
    }
}

// ============================================================================
// Extract Error
// ============================================================================

/// Error type for extraction strategies.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A CSS selector could not be compiled.
    #[error("Invalid selector {selector}: {reason}")]
    InvalidSelector {
        /// The selector source.
        selector: String,
        /// Parser message.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(FetchError::Timeout(10).is_transient());
        assert!(FetchError::Status(503).is_transient());
        assert!(FetchError::Status(429).is_transient());
        assert!(!FetchError::Status(404).is_transient());
        assert!(!FetchError::InvalidUrl("x".to_string()).is_transient());
    }
}
