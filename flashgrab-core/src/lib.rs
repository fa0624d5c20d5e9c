// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Flashgrab Core
//!
//! Core types, models, and traits for the Flashgrab workspace.
//!
//! This crate provides the foundational abstractions used across all other
//! Flashgrab crates, including:
//!
//! - Domain models (flashcards, parsed records, artifacts)
//! - Error types
//! - The naming service for run-scoped file names
//! - The [`RecordSink`] seam between extraction and persistence
//!
//! ## Key Types
//!
//! ### Records
//! - [`FlashcardRecord`] - Raw question/answer pair
//! - [`StructuredRecord`] - Question stem, options and answer
//! - [`OptionLabel`] / [`ChoiceOption`] - Multiple-choice options (A–E)
//!
//! ### Artifacts
//! - [`ArtifactInfo`] - Name, creation time and size of a stored spreadsheet

pub mod error;
pub mod models;
pub mod naming;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{ArtifactInfo, ChoiceOption, FlashcardRecord, OptionLabel, StructuredRecord};

// Re-export naming helpers
pub use naming::{random_filename, sibling_name, unique_filename};

// Re-export traits
pub use traits::{MemorySink, RecordSink};
