//! HTTP client with tracing and a per-request timeout.
//!
//! This module provides a wrapped HTTP client that adds:
//! - Request/response tracing
//! - A browser-like user agent (some flashcard sites reject bare clients)
//! - Mapping of timeouts and non-success statuses to [`FetchError`]

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::context::FetchSettings;
use crate::error::FetchError;
use crate::source::PageSource;

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper used to fetch flashcard pages.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a client using the timeout and user agent from `settings`.
    pub fn from_settings(settings: &FetchSettings) -> Result<Self, FetchError> {
        let inner = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(Self {
            inner,
            timeout: settings.timeout,
        })
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Performs a GET request and returns the body as text.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        debug!("GET request");

        let response = self
            .inner
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.map_error(e))?;
        let status = response.status();
        debug!(status = %status, "Response received");

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(|e| self.map_error(e))
    }

    fn map_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout.as_secs())
        } else {
            FetchError::Http(error)
        }
    }
}

#[async_trait]
impl PageSource for HttpClient {
    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError> {
        self.get_text(url).await
    }
}

// ============================================================================
// Tests
// ============================================================================
