//! Serde serialization/deserialization tests for core types.
//!
//! These records are handed to the transport layer as JSON, so the field
//! names and label encoding are part of the contract.

use chrono::{Local, TimeZone};
use serde_json;

use crate::{ArtifactInfo, ChoiceOption, FlashcardRecord, OptionLabel, StructuredRecord};

// ============================================================================
// OptionLabel Serde Tests
// ============================================================================

#[test]
fn test_option_label_serializes_as_letter() {
    for label in OptionLabel::ALL {
        let json = serde_json::to_string(&label).unwrap();
        assert_eq!(json, format!("\"{}\"", label.as_char()));
        let back: OptionLabel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, label);
    }
}

#[test]
fn test_option_label_rejects_unknown_letter() {
    let result: Result<OptionLabel, _> = serde_json::from_str(r#""F""#);
    assert!(result.is_err());
}

// ============================================================================
// Record Serde Tests
// ============================================================================

#[test]
fn test_flashcard_record_field_names() {
    let record = FlashcardRecord::new("Q", "A");
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["question"], "Q");
    assert_eq!(value["answer"], "A");
}

#[test]
fn test_structured_record_roundtrip() {
    let record = StructuredRecord::with_options(
        "Pick one",
        vec![
            ChoiceOption::new(OptionLabel::A, "first"),
            ChoiceOption::new(OptionLabel::E, "last"),
        ],
        "E",
    );
    let json = serde_json::to_string(&record).unwrap();
    let parsed: StructuredRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, record);
}

// ============================================================================
// ArtifactInfo Serde Tests
// ============================================================================

#[test]
fn test_artifact_info_roundtrip() {
    let created = Local.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    let info = ArtifactInfo::new("deck_deadbeef.xlsx", created, 2048);
    let json = serde_json::to_string(&info).unwrap();
    let parsed: ArtifactInfo = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, info);
}
