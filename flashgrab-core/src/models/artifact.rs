//! Artifact metadata.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Display format for artifact creation times.
const CREATED_AT_FORMAT: &str = "%d/%m/%Y %H:%M";

/// A spreadsheet artifact currently held by the artifact store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    /// File name (no directory component).
    pub name: String,
    /// Creation time of the file.
    pub created_at: DateTime<Local>,
    /// Size in bytes.
    pub size_bytes: u64,
}

impl ArtifactInfo {
    /// Creates a new artifact info.
    pub fn new(name: impl Into<String>, created_at: DateTime<Local>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            created_at,
            size_bytes,
        }
    }

    /// Creation time formatted as `dd/mm/YYYY HH:MM`.
    pub fn created_at_display(&self) -> String {
        self.created_at.format(CREATED_AT_FORMAT).to_string()
    }

    /// Size in kilobytes.
    #[allow(clippy::cast_precision_loss)]
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }

    /// Size formatted with one decimal, e.g. `"12.3 KB"`.
    pub fn size_kb_display(&self) -> String {
        format!("{:.1} KB", self.size_kb())
    }
}
