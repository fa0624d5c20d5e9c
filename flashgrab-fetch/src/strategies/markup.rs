//! Markup heuristics strategy.
//!
//! Used when a page carries no structured data. Every `div` or `p` whose
//! class list contains "question" or "answer" is collected in document
//! order, and the matches are paired up two at a time.

use flashgrab_core::FlashcardRecord;
use scraper::{ElementRef, Html};

use crate::error::ExtractError;
use crate::strategy::{ExtractKind, ExtractStrategy, selector};

const CANDIDATE_SELECTOR: &str = "div[class], p[class]";

/// Class name fragments that mark a flashcard side.
const CLASS_MARKERS: &[&str] = &["question", "answer"];

/// Extracts flashcards from question/answer class names.
#[derive(Debug, Default)]
pub struct MarkupStrategy;

impl MarkupStrategy {
    /// Creates the strategy.
    pub fn new() -> Self {
        Self
    }
}

impl ExtractStrategy for MarkupStrategy {
    fn id(&self) -> &str {
        "markup"
    }

    fn kind(&self) -> ExtractKind {
        ExtractKind::Markup
    }

    fn extract(&self, doc: &Html) -> Result<Vec<FlashcardRecord>, ExtractError> {
        let candidates = selector(CANDIDATE_SELECTOR)?;

        let texts: Vec<String> = doc
            .select(&candidates)
            .filter(|el| has_marker_class(el))
            .map(|el| stripped_text(&el))
            .collect();

        // A trailing unpaired element is ignored.
        Ok(texts
            .chunks_exact(2)
            .filter_map(|pair| FlashcardRecord::from_parts(&pair[0], &pair[1]))
            .collect())
    }
}

fn has_marker_class(el: &ElementRef<'_>) -> bool {
    el.value()
        .classes()
        .any(|class| CLASS_MARKERS.iter().any(|marker| class.contains(marker)))
}

/// Concatenates the element's text nodes, each trimmed, skipping blanks.
fn stripped_text(el: &ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(body: &str) -> Vec<FlashcardRecord> {
        let doc = Html::parse_document(&format!("<html><body>{body}</body></html>"));
        MarkupStrategy::new().extract(&doc).unwrap()
    }

    #[test]
    fn test_pairs_in_document_order() {
        let records = extract(
            r#"
            <div class="card">
                <div class="card-question">What is H2O?</div>
                <div class="card-answer">Water</div>
            </div>
            <div class="card">
                <p class="question">Largest planet?</p>
                <p class="answer">Jupiter</p>
            </div>
            "#,
        );

        assert_eq!(
            records,
            vec![
                FlashcardRecord::new("What is H2O?", "Water"),
                FlashcardRecord::new("Largest planet?", "Jupiter"),
            ]
        );
    }

    #[test]
    fn test_text_nodes_are_trimmed_and_joined() {
        let records = extract(
            r#"<div class="question">  Speed of <b> light </b> ? </div>
               <div class="answer">
                   299 792 km/s
               </div>"#,
        );

        assert_eq!(records, vec![FlashcardRecord::new("Speed oflight?", "299 792 km/s")]);
    }

    #[test]
    fn test_empty_side_drops_pair() {
        let records = extract(
            r#"<div class="question">Empty answer</div><div class="answer">  </div>
               <div class="question">Kept</div><div class="answer">Yes</div>"#,
        );

        assert_eq!(records, vec![FlashcardRecord::new("Kept", "Yes")]);
    }

    #[test]
    fn test_trailing_element_ignored() {
        let records = extract(
            r#"<div class="question">One</div><div class="answer">1</div>
               <div class="question">Dangling</div>"#,
        );

        assert_eq!(records, vec![FlashcardRecord::new("One", "1")]);
    }

    #[test]
    fn test_other_elements_ignored() {
        let records = extract(
            r#"<span class="question">Not a div</span><span class="answer">Nope</span>
               <div class="header">Title</div>"#,
        );

        assert!(records.is_empty());
    }
}
