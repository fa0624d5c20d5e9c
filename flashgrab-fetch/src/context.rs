//! Fetch context providing access to the page source and settings.
//!
//! The fetch context is handed to the pagination driver and bundles the
//! [`PageSource`] together with the knobs that govern a single run.

use std::sync::Arc;
use std::time::Duration;

use crate::error::FetchError;
use crate::host::http::HttpClient;
use crate::retry::RetryStrategy;
use crate::source::PageSource;

/// Per-request timeout used when nothing else is configured.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Browser-like user agent sent with every page request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for fetch operations.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Timeout for a single page request.
    pub timeout: Duration,
    /// User agent header.
    pub user_agent: String,
    /// Extra attempts for a page whose fetch failed transiently.
    pub page_retries: u32,
    /// Delay before the first retry.
    pub retry_delay: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_retries: 0,
            retry_delay: Duration::from_secs(1),
        }
    }
}

impl FetchSettings {
    /// Creates settings with custom timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Creates settings with a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Creates settings that retry failed pages.
    pub fn with_page_retries(mut self, retries: u32) -> Self {
        self.page_retries = retries;
        self
    }

    /// Returns the retry strategy for page fetches.
    pub fn retry_strategy(&self) -> RetryStrategy {
        if self.page_retries == 0 {
            RetryStrategy::no_retry()
        } else {
            RetryStrategy::new(self.page_retries + 1).with_base_delay(self.retry_delay)
        }
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Context for one or more extraction runs.
pub struct FetchContext {
    /// Where pages come from.
    pub source: Arc<dyn PageSource>,
    /// Fetch settings.
    pub settings: FetchSettings,
}

impl FetchContext {
    /// Creates a context backed by an HTTP client built from `settings`.
    pub fn with_settings(settings: FetchSettings) -> Result<Self, FetchError> {
        let http = HttpClient::from_settings(&settings)?;
        Ok(Self {
            source: Arc::new(http),
            settings,
        })
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> FetchContextBuilder {
        FetchContextBuilder::new()
    }
}

impl std::fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchContext")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Fetch Context Builder
// ============================================================================

/// Builder for constructing a `FetchContext`.
#[derive(Default)]
pub struct FetchContextBuilder {
    source: Option<Arc<dyn PageSource>>,
    settings: FetchSettings,
}

impl FetchContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page source.
    pub fn source(mut self, source: Arc<dyn PageSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the fetch settings.
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builds the context, creating an HTTP client if no source was given.
    pub fn build(self) -> Result<FetchContext, FetchError> {
        let source = match self.source {
            Some(source) => source,
            None => Arc::new(HttpClient::from_settings(&self.settings)?),
        };
        Ok(FetchContext {
            source,
            settings: self.settings,
        })
    }
}
