//! Domain models for Flashgrab.
//!
//! This module contains the data structures that flow through the
//! extraction pipeline and the artifact store.
//!
//! ## Submodules
//!
//! - [`record`] - Extracted and parsed flashcards (FlashcardRecord, StructuredRecord)
//! - [`artifact`] - Stored spreadsheet metadata (ArtifactInfo)

mod artifact;
mod record;

// Re-export everything at the models level
pub use artifact::ArtifactInfo;
pub use record::{ChoiceOption, FlashcardRecord, OptionLabel, StructuredRecord};
#[cfg(test)]
mod serde_tests;
