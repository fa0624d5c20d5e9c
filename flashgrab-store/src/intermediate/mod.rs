//! Intermediate log.
//!
//! Every run stages its records in a plain text log before the spreadsheet
//! is built:
//!
//! ```text
//! ===== FLASHCARD EXTRACTION =====
//!
//! Question 1: What is 2+2?
//! A) 3
//! B) 4
//! Answer 1: B) 4
//!
//! Question 2: ...
//! ```
//!
//! Numbers run across all pages of one run. The [`writer`] appends blocks
//! page by page and the [`parser`] turns the whole log back into
//! [`flashgrab_core::StructuredRecord`]s.

pub mod parser;
pub mod writer;

pub use parser::{parse_log, read_log, split_options};
pub use writer::{LogWriter, format_block};

/// First line of every log.
pub const LOG_BANNER: &str = "===== FLASHCARD EXTRACTION =====";

/// Extension of intermediate log files.
pub const LOG_EXTENSION: &str = ".txt";
