//! JSON-LD structured data strategy.
//!
//! Flashcard sites that publish schema.org `Quiz` markup embed the cards in
//! `<script type="application/ld+json">` blocks:
//!
//! ```json
//! {
//!   "@type": "Quiz",
//!   "hasPart": [
//!     { "@type": "Question", "text": "...", "acceptedAnswer": { "text": "..." } }
//!   ]
//! }
//! ```
//!
//! Cards are read from `hasPart`, falling back to `question` when `hasPart`
//! is missing or empty.

use flashgrab_core::FlashcardRecord;
use scraper::Html;
use serde_json::Value;
use tracing::debug;

use crate::error::ExtractError;
use crate::strategy::{ExtractKind, ExtractStrategy, selector};

const SCRIPT_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

/// Extracts flashcards from JSON-LD blocks.
#[derive(Debug, Default)]
pub struct JsonLdStrategy;

impl JsonLdStrategy {
    /// Creates the strategy.
    pub fn new() -> Self {
        Self
    }
}

impl ExtractStrategy for JsonLdStrategy {
    fn id(&self) -> &str {
        "jsonld"
    }

    fn kind(&self) -> ExtractKind {
        ExtractKind::StructuredData
    }

    fn extract(&self, doc: &Html) -> Result<Vec<FlashcardRecord>, ExtractError> {
        let scripts = selector(SCRIPT_SELECTOR)?;
        let mut records = Vec::new();

        for (index, script) in doc.select(&scripts).enumerate() {
            let raw: String = script.text().collect();
            match serde_json::from_str::<Value>(raw.trim()) {
                Ok(value) => collect_documents(&value, &mut records),
                Err(e) => debug!(block = index, error = %e, "Skipping malformed JSON-LD block"),
            }
        }

        Ok(records)
    }
}

/// A top-level array holds several documents; anything else is one document.
fn collect_documents(value: &Value, out: &mut Vec<FlashcardRecord>) {
    match value {
        Value::Array(documents) => {
            for document in documents {
                collect_cards(document, out);
            }
        }
        document => collect_cards(document, out),
    }
}

fn collect_cards(document: &Value, out: &mut Vec<FlashcardRecord>) {
    let cards = document
        .get("hasPart")
        .filter(|v| !is_empty(v))
        .or_else(|| document.get("question"));

    let Some(cards) = cards else {
        return;
    };

    for card in as_list(cards) {
        let question = card.get("text").and_then(Value::as_str).unwrap_or_default();
        let answer = card
            .get("acceptedAnswer")
            .and_then(|a| as_list(a).first().copied())
            .and_then(|a| a.get("text"))
            .and_then(Value::as_str)
            .unwrap_or_default();

        if let Some(record) = FlashcardRecord::from_parts(question, answer) {
            out.push(record);
        }
    }
}

/// Treats a single object as a one-element list.
fn as_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![value],
        _ => Vec::new(),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

// ============================================================================
// Tests
// ============================================================================
