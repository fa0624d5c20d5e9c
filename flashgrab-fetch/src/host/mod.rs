//! Host APIs for Flashgrab fetching.
//!
//! - [`http`] - HTTP client with tracing and per-request timeout

pub mod http;

// Re-export key types
pub use http::HttpClient;
