//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

use chrono::{Local, TimeZone};
use flashgrab_core::{ArtifactInfo, FlashcardRecord};
use flashgrab_fetch::{PaginationSummary, StopReason};
use flashgrab_store::{DeleteOutcome, ExtractionReport, Settings, SweepReport, schedule_expiry};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::json::JsonFormatter;
use super::text::TextFormatter;

fn artifact(name: &str, size: u64) -> ArtifactInfo {
    let created = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap();
    ArtifactInfo::new(name, created, size)
}

fn summary(total: usize, stop: StopReason) -> PaginationSummary {
    PaginationSummary {
        pages_fetched: 3,
        total_records: total,
        next_number: total as u64 + 1,
        stop,
    }
}

async fn report() -> ExtractionReport {
    let path = PathBuf::from("/tmp/flashgrab-test/samplepage_0a1b2c3d.xlsx");
    let expiry = schedule_expiry(path.clone(), Duration::from_secs(3600));
    expiry.cancel();
    ExtractionReport {
        name: "samplepage_0a1b2c3d.xlsx".to_string(),
        path,
        records: 42,
        pages: 4,
        stop: StopReason::Exhausted,
        info: artifact("samplepage_0a1b2c3d.xlsx", 12_646),
        expiry,
    }
}

// ============================================================================
// Text Formatter
// ============================================================================

#[tokio::test]
async fn test_text_report() {
    let output = TextFormatter::new(false).format_report(&report().await, Duration::from_secs(86_400));

    assert!(output.contains("42 flashcards extracted"));
    assert!(output.contains("samplepage_0a1b2c3d.xlsx"));
    assert!(output.contains("12.3 KB"));
    assert!(output.contains("Expires in 24h"));
    assert!(!output.contains("\x1b["));
}

#[tokio::test]
async fn test_text_report_without_records() {
    let mut empty = report().await;
    empty.records = 0;
    empty.pages = 1;

    let output = TextFormatter::new(false).format_report(&empty, Duration::from_secs(86_400));

    assert!(output.contains("No flashcards found"));
    assert!(!output.contains("flashcards extracted"));
}

#[test]
fn test_text_artifacts_table() {
    let output = TextFormatter::new(false).format_artifacts(
        &[artifact("deck_0a1b2c3d.xlsx", 12_646), artifact("b.xlsx", 0)],
        Path::new("/tmp"),
    );

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Name"));
    assert!(lines[2].contains("07/03/2024 09:05"));
    assert!(lines[2].ends_with("12.3 KB"));
    assert!(lines[3].ends_with("0.0 KB"));
}

#[test]
fn test_text_empty_listing() {
    let output = TextFormatter::new(false).format_artifacts(&[], Path::new("/srv/cards"));
    assert_eq!(output, "No artifacts in /srv/cards");
}

#[test]
fn test_text_dry_run_preview() {
    let records = vec![
        (1, FlashcardRecord::new("What is 2+2?\nA) 3\nB) 4", "B) 4")),
        (2, FlashcardRecord::new("Capital of Peru?", "Lima")),
    ];
    let output = TextFormatter::new(false)
        .format_dry_run(&summary(2, StopReason::FetchFailed("HTTP 503".into())), &records);

    assert!(output.contains("2 flashcards on 2 page(s)"));
    assert!(output.contains("fetch failed: HTTP 503"));
    assert!(output.contains("   1. What is 2+2?"));
    assert!(!output.contains("A) 3"));
}

#[test]
fn test_text_sweep() {
    let formatter = TextFormatter::new(false);
    assert_eq!(formatter.format_sweep(&SweepReport::default()), "Nothing to remove");

    let report = SweepReport {
        expired: vec!["old.xlsx".into()],
        evicted: vec!["older.xlsx".into()],
    };
    let output = formatter.format_sweep(&report);
    assert!(output.contains("expired  old.xlsx"));
    assert!(output.ends_with("Removed 2 file(s)"));
}

#[test]
fn test_text_settings() {
    let output = TextFormatter::new(false).format_settings(&Settings::default());
    assert!(output.contains("Max artifacts:  10"));
    assert!(output.contains("Expiry:         24h"));
    assert!(output.contains("Fetch timeout:  10s"));
}

// ============================================================================
// JSON Formatter
// ============================================================================

#[tokio::test]
async fn test_json_report() {
    let output = JsonFormatter::new(false).format_report(&report().await).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["records"], 42);
    assert_eq!(value["pages"], 4);
    assert_eq!(value["sizeBytes"], 12_646);
    assert_eq!(value["stop"]["reason"], "exhausted");
    assert!(value["stop"].get("error").is_none());
    assert!(value["createdAt"].as_str().unwrap().starts_with("2024-03-07T09:05:00"));
}

#[test]
fn test_json_artifacts() {
    let output = JsonFormatter::new(false)
        .format_artifacts(&[artifact("deck.xlsx", 2048)])
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value[0]["name"], "deck.xlsx");
    assert_eq!(value[0]["sizeKb"], "2.0 KB");
}

#[test]
fn test_json_dry_run_numbers() {
    let records = vec![(7, FlashcardRecord::new("q", "a"))];
    let output = JsonFormatter::new(false)
        .format_dry_run(&summary(1, StopReason::Exhausted), &records)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["totalRecords"], 1);
    assert_eq!(value["records"][0]["number"], 7);
}

#[test]
fn test_json_deleted() {
    let output = JsonFormatter::new(false)
        .format_deleted("a.xlsx", DeleteOutcome::NotFound)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value, serde_json::json!({"name": "a.xlsx", "deleted": false}));
}
