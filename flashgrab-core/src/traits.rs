//! Trait definitions for Flashgrab.
//!
//! These are the seams between the crates: the fetch crate produces records
//! and hands them to whatever [`RecordSink`] the caller provides.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::FlashcardRecord;

/// Destination for batches of extracted records.
///
/// The question number is run-scoped state owned by the caller: it is passed
/// in with every batch and the updated value is handed back.
#[async_trait]
pub trait RecordSink: Send {
    /// Appends a batch, numbering it from `start_number`.
    ///
    /// Returns the next free number (`start_number + records.len()`).
    async fn append(
        &mut self,
        records: &[FlashcardRecord],
        start_number: u64,
    ) -> Result<u64, CoreError>;
}

/// In-memory sink that keeps numbered records. Used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Records with the number they were written under.
    pub records: Vec<(u64, FlashcardRecord)>,
    /// Number of `append` calls received.
    pub batches: usize,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn append(
        &mut self,
        records: &[FlashcardRecord],
        start_number: u64,
    ) -> Result<u64, CoreError> {
        self.batches += 1;
        let mut number = start_number;
        for record in records {
            self.records.push((number, record.clone()));
            number += 1;
        }
        Ok(number)
    }
}
