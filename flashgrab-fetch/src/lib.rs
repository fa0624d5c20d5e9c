// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Flashgrab Fetch
//!
//! Page fetching, flashcard extraction, and pagination for Flashgrab.
//!
//! ## Host APIs
//!
//! - [`host::http`] - HTTP client with tracing and per-request timeout
//!
//! ## Extraction Pipeline
//!
//! The extraction pipeline runs multiple strategies in priority order:
//!
//! - [`strategy::ExtractStrategy`] - Trait for extraction implementations
//! - [`pipeline::ExtractPipeline`] - Runs strategies until one yields records
//! - [`strategies`] - JSON-LD and markup strategies
//!
//! ## Pagination
//!
//! - [`pagination::PaginationDriver`] - Walks `?page=N` until a page is empty
//! - [`context::FetchContext`] - Page source plus settings
//!
//! ## Example
//!
//! ```ignore
//! use flashgrab_fetch::{ExtractPipeline, FetchContext, FetchSettings, PaginationDriver};
//!
//! let ctx = FetchContext::with_settings(FetchSettings::default())?;
//! let driver = PaginationDriver::new(&ctx, Arc::new(ExtractPipeline::standard()));
//!
//! let summary = driver.run(&url, &mut sink).await?;
//! println!("{} flashcards", summary.total_records);
//! ```

// Core modules
pub mod context;
pub mod error;
pub mod host;
pub mod pagination;
pub mod pipeline;
pub mod retry;
pub mod source;
pub mod strategies;
pub mod strategy;

// Re-export key types at crate root

// Errors
pub use error::{ExtractError, FetchError};

// Host APIs
pub use host::http::HttpClient;

// Strategy & Pipeline
pub use context::{FetchContext, FetchContextBuilder, FetchSettings};
pub use pipeline::{ExtractAttempt, ExtractOutcome, ExtractPipeline};
pub use strategies::{JsonLdStrategy, MarkupStrategy};
pub use strategy::{ExtractKind, ExtractStrategy, StrategyInfo};

// Pagination
pub use pagination::{PaginationDriver, PaginationSummary, StopReason};
pub use retry::RetryStrategy;
pub use source::{PageSource, page_url, parse_source_url};
