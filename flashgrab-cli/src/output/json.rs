//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Local};
use flashgrab_core::{ArtifactInfo, FlashcardRecord};
use flashgrab_fetch::{PaginationSummary, StopReason};
use flashgrab_store::{DeleteOutcome, ExtractionReport, SweepReport};
use serde::{Serialize, Serializer};

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a finished extraction.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutput {
    pub name: String,
    pub path: String,
    pub records: usize,
    pub pages: u32,
    pub stop: StopOutput,
    pub size_bytes: u64,
    #[serde(serialize_with = "serialize_datetime")]
    pub created_at: DateTime<Local>,
}

/// Why pagination ended.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopOutput {
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One stored artifact.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactOutput {
    pub name: String,
    #[serde(serialize_with = "serialize_datetime")]
    pub created_at: DateTime<Local>,
    pub size_bytes: u64,
    pub size_kb: String,
}

/// A dry run's findings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DryRunOutput {
    pub pages: u32,
    pub total_records: usize,
    pub stop: StopOutput,
    pub records: Vec<NumberedRecordOutput>,
}

/// A record with its question number.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberedRecordOutput {
    pub number: u64,
    pub question: String,
    pub answer: String,
}

// ============================================================================
// Serialization helpers
// ============================================================================

fn serialize_datetime<S>(dt: &DateTime<Local>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339())
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Serializes any value.
    pub fn format<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        })
    }

    /// Formats a finished extraction.
    pub fn format_report(&self, report: &ExtractionReport) -> Result<String> {
        self.format(&self.report_to_output(report))
    }

    /// Formats a dry run.
    pub fn format_dry_run(
        &self,
        summary: &PaginationSummary,
        records: &[(u64, FlashcardRecord)],
    ) -> Result<String> {
        let output = DryRunOutput {
            pages: summary.pages_with_records(),
            total_records: summary.total_records,
            stop: self.stop_to_output(&summary.stop),
            records: records
                .iter()
                .map(|(number, record)| NumberedRecordOutput {
                    number: *number,
                    question: record.question.clone(),
                    answer: record.answer.clone(),
                })
                .collect(),
        };
        self.format(&output)
    }

    /// Formats the artifact listing.
    pub fn format_artifacts(&self, artifacts: &[ArtifactInfo]) -> Result<String> {
        let outputs: Vec<ArtifactOutput> =
            artifacts.iter().map(|a| self.artifact_to_output(a)).collect();
        self.format(&outputs)
    }

    /// Formats the result of a delete.
    pub fn format_deleted(&self, name: &str, outcome: DeleteOutcome) -> Result<String> {
        self.format(&serde_json::json!({
            "name": name,
            "deleted": outcome == DeleteOutcome::Deleted,
        }))
    }

    /// Formats a sweep report.
    pub fn format_sweep(&self, report: &SweepReport) -> Result<String> {
        self.format(&serde_json::json!({
            "expired": report.expired,
            "evicted": report.evicted,
        }))
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    pub(crate) fn report_to_output(&self, report: &ExtractionReport) -> ReportOutput {
        ReportOutput {
            name: report.name.clone(),
            path: report.path.display().to_string(),
            records: report.records,
            pages: report.pages,
            stop: self.stop_to_output(&report.stop),
            size_bytes: report.info.size_bytes,
            created_at: report.info.created_at,
        }
    }

    pub(crate) fn artifact_to_output(&self, artifact: &ArtifactInfo) -> ArtifactOutput {
        ArtifactOutput {
            name: artifact.name.clone(),
            created_at: artifact.created_at,
            size_bytes: artifact.size_bytes,
            size_kb: artifact.size_kb_display(),
        }
    }

    pub(crate) fn stop_to_output(&self, stop: &StopReason) -> StopOutput {
        match stop {
            StopReason::Exhausted => StopOutput {
                reason: "exhausted".to_string(),
                error: None,
            },
            StopReason::FetchFailed(error) => StopOutput {
                reason: "fetchFailed".to_string(),
                error: Some(error.clone()),
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
