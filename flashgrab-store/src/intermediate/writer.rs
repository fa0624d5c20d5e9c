//! Append-only log writer.

use async_trait::async_trait;
use flashgrab_core::{CoreError, FlashcardRecord, RecordSink};
use regex::Regex;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

use super::LOG_BANNER;
use crate::error::StoreError;

/// Lines inside a record that would read as block markers, escaped or not.
static MARKER_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\\*(?:Question|Answer) \d+: ").expect("Invalid regex")
});

/// Formats one numbered block, including the trailing blank line.
///
/// Record lines that start like a marker get one extra leading backslash,
/// which the parser strips again.
pub fn format_block(number: u64, record: &FlashcardRecord) -> String {
    format!(
        "Question {number}: {}\nAnswer {number}: {}\n\n",
        escape_markers(&record.question),
        escape_markers(&record.answer)
    )
}

fn escape_markers(text: &str) -> Cow<'_, str> {
    MARKER_LINE_RE.replace_all(text, r"\$0")
}

/// Writes numbered blocks to a log file.
///
/// The file is opened, written, flushed and closed on every call, so a
/// crash mid-run leaves every finished page on disk.
#[derive(Debug, Clone)]
pub struct LogWriter {
    path: PathBuf,
}

impl LogWriter {
    /// Creates (or truncates) the log at `path` and writes the banner.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn create(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        tokio::fs::write(&path, format!("{LOG_BANNER}\n\n")).await?;
        debug!("Created intermediate log");
        Ok(Self { path })
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_blocks(&self, text: &str) -> Result<(), StoreError> {
        let mut file = OpenOptions::new().append(true).open(&self.path).await?;
        file.write_all(text.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl RecordSink for LogWriter {
    async fn append(
        &mut self,
        records: &[FlashcardRecord],
        start_number: u64,
    ) -> Result<u64, CoreError> {
        let mut text = String::new();
        let mut number = start_number;
        for record in records {
            text.push_str(&format_block(number, record));
            number += 1;
        }

        self.write_blocks(&text).await?;
        debug!(
            path = %self.path.display(),
            first = start_number,
            count = records.len(),
            "Appended blocks"
        );
        Ok(number)
    }
}
