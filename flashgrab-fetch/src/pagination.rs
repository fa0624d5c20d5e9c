//! Pagination driver.
//!
//! Walks `?page=1`, `?page=2`, … of a source URL, extracting each page and
//! handing the records to a [`RecordSink`]. The loop ends at the first page
//! that yields no records. A page whose fetch fails counts as empty, so a
//! network error also ends the run; the two cases are told apart only in
//! [`StopReason`].

use std::sync::Arc;
use std::time::Instant;

use flashgrab_core::RecordSink;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::context::FetchContext;
use crate::error::FetchError;
use crate::pipeline::ExtractPipeline;
use crate::retry::RetryStrategy;
use crate::source::{PageSource, page_url};

/// First question number of a run.
pub const FIRST_QUESTION_NUMBER: u64 = 1;

// ============================================================================
// Summary Types
// ============================================================================

/// Why the pagination loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// A page was fetched but contained no records.
    Exhausted,
    /// A page could not be fetched.
    FetchFailed(String),
}

/// Result of one pagination run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationSummary {
    /// Pages requested, including the one that ended the run.
    pub pages_fetched: u32,
    /// Records handed to the sink.
    pub total_records: usize,
    /// Next free question number.
    pub next_number: u64,
    /// Why the loop ended.
    pub stop: StopReason,
}

impl PaginationSummary {
    /// Pages that contributed records.
    pub fn pages_with_records(&self) -> u32 {
        self.pages_fetched.saturating_sub(1)
    }
}

// ============================================================================
// Pagination Driver
// ============================================================================

/// Drives page fetches and extraction for one source URL at a time.
pub struct PaginationDriver {
    source: Arc<dyn PageSource>,
    pipeline: Arc<ExtractPipeline>,
    retry: RetryStrategy,
}

impl PaginationDriver {
    /// Creates a driver from a fetch context and pipeline.
    pub fn new(ctx: &FetchContext, pipeline: Arc<ExtractPipeline>) -> Self {
        Self {
            source: Arc::clone(&ctx.source),
            pipeline,
            retry: ctx.settings.retry_strategy(),
        }
    }

    /// Runs the loop over `base_url`, writing each page's records to `sink`.
    ///
    /// Only a sink failure is returned as an error; fetch failures end the
    /// loop and are reported through [`PaginationSummary::stop`].
    #[instrument(skip(self, sink), fields(url = %base_url))]
    pub async fn run(
        &self,
        base_url: &Url,
        sink: &mut dyn RecordSink,
    ) -> Result<PaginationSummary, FetchError> {
        let start = Instant::now();
        let mut page: u32 = 1;
        let mut number = FIRST_QUESTION_NUMBER;
        let mut total_records = 0usize;

        let stop = loop {
            let url = page_url(base_url, page);

            let body = match self.fetch_with_retry(&url).await {
                Ok(body) => body,
                Err(error) => {
                    warn!(page, error = %error, "Page fetch failed, ending pagination");
                    break StopReason::FetchFailed(error.to_string());
                }
            };

            let outcome = self.pipeline.extract(&body);
            if outcome.is_empty() {
                debug!(page, "Page yielded no records");
                break StopReason::Exhausted;
            }

            number = sink.append(&outcome.records, number).await?;
            total_records += outcome.records.len();
            info!(
                page,
                records = outcome.records.len(),
                strategy = outcome.successful_strategy().unwrap_or_default(),
                "Extracted flashcards from page"
            );

            page += 1;
        };

        info!(
            total_records,
            pages = page,
            duration = ?start.elapsed(),
            "Pagination finished"
        );

        Ok(PaginationSummary {
            pages_fetched: page,
            total_records,
            next_number: number,
            stop,
        })
    }

    async fn fetch_with_retry(&self, url: &Url) -> Result<String, FetchError> {
        let mut attempt = 1;
        loop {
            match self.source.fetch_page(url).await {
                Ok(body) => return Ok(body),
                Err(error) if self.retry.should_retry(attempt, &error) => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    warn!(
                        url = %url,
                        attempt,
                        error = %error,
                        delay = ?delay,
                        "Page fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
