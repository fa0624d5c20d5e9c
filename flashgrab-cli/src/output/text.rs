//! Text output formatting with colors.

use flashgrab_core::{ArtifactInfo, FlashcardRecord};
use flashgrab_fetch::{PaginationSummary, StopReason};
use flashgrab_store::{ExtractionReport, Settings, SweepReport};
use std::path::Path;
use std::time::Duration;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Longest question shown in a dry-run preview line.
const PREVIEW_WIDTH: usize = 60;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a finished extraction.
    pub fn format_report(&self, report: &ExtractionReport, expiry: Duration) -> String {
        let mut lines = Vec::new();

        if report.records == 0 {
            lines.push(format!(
                "{} {}",
                self.yellow("!"),
                self.bold("No flashcards found; the sheet has only the header row")
            ));
        } else {
            lines.push(format!(
                "{} {}",
                self.green("✓"),
                self.bold(&format!("{} flashcards extracted", report.records))
            ));
        }
        lines.push(format!("File:    {}", self.cyan(&report.path.display().to_string())));
        lines.push(format!("Size:    {}", report.info.size_kb_display()));
        lines.push(format!(
            "Pages:   {} ({})",
            report.pages,
            self.format_stop(&report.stop)
        ));
        lines.push(self.dim(&format!(
            "Expires in {}; run `flashgrab sweep` to clean up after that.",
            format_duration(expiry)
        )));

        lines.join("\n")
    }

    /// Formats a dry run: the summary plus one preview line per record.
    pub fn format_dry_run(
        &self,
        summary: &PaginationSummary,
        records: &[(u64, FlashcardRecord)],
    ) -> String {
        let mut lines = vec![
            self.bold(&format!(
                "{} flashcards on {} page(s)",
                summary.total_records,
                summary.pages_with_records()
            )),
            format!("Stopped: {}", self.format_stop(&summary.stop)),
        ];

        if !records.is_empty() {
            lines.push(String::new());
        }
        for (number, record) in records {
            let first_line = record.question.lines().next().unwrap_or_default();
            lines.push(format!(
                "{:>4}. {}",
                number,
                truncate(first_line, PREVIEW_WIDTH)
            ));
        }

        lines.join("\n")
    }

    /// Formats the artifact listing.
    pub fn format_artifacts(&self, artifacts: &[ArtifactInfo], dir: &Path) -> String {
        if artifacts.is_empty() {
            return self.dim(&format!("No artifacts in {}", dir.display()));
        }

        let width = artifacts.iter().map(|a| a.name.len()).max().unwrap_or(0);
        let mut lines = vec![
            self.bold(&format!("{:<width$}  {:<16}  {:>9}", "Name", "Created", "Size")),
            "─".repeat(width + 31),
        ];

        for artifact in artifacts {
            lines.push(format!(
                "{:<width$}  {:<16}  {:>9}",
                artifact.name,
                artifact.created_at_display(),
                artifact.size_kb_display()
            ));
        }

        lines.join("\n")
    }

    /// Formats a successful delete.
    pub fn format_deleted(&self, name: &str) -> String {
        format!("{} Deleted {}", self.green("✓"), name)
    }

    /// Formats a sweep report.
    pub fn format_sweep(&self, report: &SweepReport) -> String {
        if report.removed() == 0 {
            return self.dim("Nothing to remove");
        }

        let mut lines = Vec::new();
        for name in &report.expired {
            lines.push(format!("{} expired  {}", self.yellow("-"), name));
        }
        for name in &report.evicted {
            lines.push(format!("{} over cap {}", self.yellow("-"), name));
        }
        lines.push(format!("Removed {} file(s)", report.removed()));
        lines.join("\n")
    }

    /// Formats the effective settings.
    pub fn format_settings(&self, settings: &Settings) -> String {
        [
            self.bold("Flashgrab Configuration"),
            "─".repeat(40),
            String::new(),
            format!("Artifacts dir:  {}", settings.artifacts_dir().display()),
            format!("Max artifacts:  {}", settings.max_artifacts),
            format!("Expiry:         {}", format_duration(settings.expiry())),
            format!("Fetch timeout:  {}s", settings.fetch_timeout_secs),
            format!("Page retries:   {}", settings.page_retries),
            format!("User agent:     {}", self.dim(&settings.user_agent)),
        ]
        .join("\n")
    }

    fn format_stop(&self, stop: &StopReason) -> String {
        match stop {
            StopReason::Exhausted => "no more cards".to_string(),
            StopReason::FetchFailed(reason) => self.yellow(&format!("fetch failed: {reason}")),
        }
    }

    // ========================================================================
    // Color helpers
    // ========================================================================

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// Formats a duration with its largest whole unit: `24h`, `30m`, `45s`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 && secs % 3600 == 0 {
        format!("{}h", secs / 3600)
    } else if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{secs}s")
    }
}

/// Shortens `text` to `max` characters, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}
