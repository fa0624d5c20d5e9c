//! Extraction pipeline for executing strategies in order.
//!
//! The pipeline takes a list of extraction strategies and runs them in
//! priority order until one yields at least one record.

use std::time::{Duration, Instant};

use flashgrab_core::FlashcardRecord;
use scraper::Html;
use tracing::{debug, warn};

use crate::strategy::{ExtractKind, ExtractStrategy, StrategyInfo};
use crate::strategies::{JsonLdStrategy, MarkupStrategy};

// ============================================================================
// Extract Attempt
// ============================================================================

/// Record of a single strategy attempt on one page.
#[derive(Debug, Clone)]
pub struct ExtractAttempt {
    /// The strategy ID that was attempted.
    pub strategy_id: String,
    /// The kind of content the strategy read.
    pub kind: ExtractKind,
    /// Number of records the strategy produced.
    pub records: usize,
    /// Error if the strategy failed.
    pub error: Option<String>,
    /// How long the attempt took.
    pub duration: Duration,
}

impl ExtractAttempt {
    /// Creates a completed attempt record.
    pub fn completed(
        strategy_id: impl Into<String>,
        kind: ExtractKind,
        records: usize,
        duration: Duration,
    ) -> Self {
        Self {
            strategy_id: strategy_id.into(),
            kind,
            records,
            error: None,
            duration,
        }
    }

    /// Creates a failed attempt record.
    pub fn failure(
        strategy_id: impl Into<String>,
        kind: ExtractKind,
        error: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            strategy_id: strategy_id.into(),
            kind,
            records: 0,
            error: Some(error.into()),
            duration,
        }
    }
}

// ============================================================================
// Extract Outcome
// ============================================================================

/// The outcome of running the pipeline over one page.
#[derive(Debug, Default)]
pub struct ExtractOutcome {
    /// Records from the winning strategy. Empty if no strategy matched.
    pub records: Vec<FlashcardRecord>,
    /// The strategy whose records were taken.
    pub strategy_id: Option<String>,
    /// All attempts made.
    pub attempts: Vec<ExtractAttempt>,
}

impl ExtractOutcome {
    /// Returns true if no strategy produced records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of strategies that were tried.
    pub fn attempts_count(&self) -> usize {
        self.attempts.len()
    }

    /// Returns the successful strategy ID, if any.
    pub fn successful_strategy(&self) -> Option<&str> {
        self.strategy_id.as_deref()
    }

    /// Returns all errors that occurred.
    pub fn errors(&self) -> Vec<&str> {
        self.attempts
            .iter()
            .filter_map(|a| a.error.as_deref())
            .collect()
    }
}

// ============================================================================
// Extract Pipeline
// ============================================================================

/// A pipeline of extraction strategies tried in order.
pub struct ExtractPipeline {
    strategies: Vec<Box<dyn ExtractStrategy>>,
}

impl ExtractPipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Creates the standard pipeline: JSON-LD first, markup heuristics second.
    pub fn standard() -> Self {
        Self::with_strategies(vec![
            Box::new(JsonLdStrategy::new()),
            Box::new(MarkupStrategy::new()),
        ])
    }

    /// Creates a pipeline with the given strategies.
    pub fn with_strategies(strategies: Vec<Box<dyn ExtractStrategy>>) -> Self {
        let mut pipeline = Self { strategies };
        pipeline.sort_by_priority();
        pipeline
    }

    /// Sorts strategies by priority (highest first). The sort is stable, so
    /// equal priorities keep insertion order.
    fn sort_by_priority(&mut self) {
        self.strategies.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Returns the number of strategies in the pipeline.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns true if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Returns information about all strategies, in execution order.
    pub fn strategy_info(&self) -> Vec<StrategyInfo> {
        self.strategies
            .iter()
            .map(|s| StrategyInfo::from_strategy(s.as_ref()))
            .collect()
    }

    /// Parses `body` as HTML and runs the strategies over it.
    pub fn extract(&self, body: &str) -> ExtractOutcome {
        let doc = Html::parse_document(body);
        self.execute(&doc)
    }

    /// Runs the strategies over a parsed page until one yields records.
    pub fn execute(&self, doc: &Html) -> ExtractOutcome {
        let mut outcome = ExtractOutcome::default();

        for strategy in &self.strategies {
            let strategy_id = strategy.id();
            let kind = strategy.kind();
            let start = Instant::now();

            match strategy.extract(doc) {
                Ok(records) => {
                    let duration = start.elapsed();
                    debug!(
                        strategy = %strategy_id,
                        records = records.len(),
                        duration = ?duration,
                        "Strategy finished"
                    );
                    outcome.attempts.push(ExtractAttempt::completed(
                        strategy_id,
                        kind,
                        records.len(),
                        duration,
                    ));

                    if !records.is_empty() {
                        outcome.records = records;
                        outcome.strategy_id = Some(strategy_id.to_string());
                        return outcome;
                    }
                }
                Err(error) => {
                    let duration = start.elapsed();
                    warn!(strategy = %strategy_id, error = %error, "Strategy failed");
                    outcome.attempts.push(ExtractAttempt::failure(
                        strategy_id,
                        kind,
                        error.to_string(),
                        duration,
                    ));
                }
            }
        }

        debug!("No strategy produced records");
        outcome
    }
}

impl Default for ExtractPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;

    struct FixedStrategy {
        id: String,
        kind: ExtractKind,
        records: Vec<FlashcardRecord>,
    }

    impl FixedStrategy {
        fn new(id: &str, kind: ExtractKind, count: usize) -> Self {
            let records = (1..=count)
                .map(|i| FlashcardRecord::new(format!("{id} q{i}"), format!("{id} a{i}")))
                .collect();
            Self {
                id: id.to_string(),
                kind,
                records,
            }
        }
    }

    impl ExtractStrategy for FixedStrategy {
        fn id(&self) -> &str {
            &self.id
        }

        fn kind(&self) -> ExtractKind {
            self.kind
        }

        fn extract(&self, _doc: &Html) -> Result<Vec<FlashcardRecord>, ExtractError> {
            Ok(self.records.clone())
        }
    }

    struct FailingStrategy;

    impl ExtractStrategy for FailingStrategy {
        fn id(&self) -> &str {
            "failing"
        }

        fn kind(&self) -> ExtractKind {
            ExtractKind::StructuredData
        }

        fn extract(&self, _doc: &Html) -> Result<Vec<FlashcardRecord>, ExtractError> {
            Err(ExtractError::InvalidSelector {
                selector: "[[".to_string(),
                reason: "mock".to_string(),
            })
        }
    }

    fn empty_doc() -> Html {
        Html::parse_document("<html><body></body></html>")
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = ExtractPipeline::new();
        let outcome = pipeline.execute(&empty_doc());

        assert!(outcome.is_empty());
        assert_eq!(outcome.attempts_count(), 0);
        assert_eq!(outcome.successful_strategy(), None);
    }

    #[test]
    fn test_structured_data_runs_first() {
        // Inserted in the "wrong" order; priority must fix it.
        let pipeline = ExtractPipeline::with_strategies(vec![
            Box::new(FixedStrategy::new("markup", ExtractKind::Markup, 2)),
            Box::new(FixedStrategy::new("jsonld", ExtractKind::StructuredData, 3)),
        ]);

        let outcome = pipeline.execute(&empty_doc());
        assert_eq!(outcome.successful_strategy(), Some("jsonld"));
        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.attempts_count(), 1);
    }

    #[test]
    fn test_fallback_on_empty_result() {
        let pipeline = ExtractPipeline::with_strategies(vec![
            Box::new(FixedStrategy::new("jsonld", ExtractKind::StructuredData, 0)),
            Box::new(FixedStrategy::new("markup", ExtractKind::Markup, 2)),
        ]);

        let outcome = pipeline.execute(&empty_doc());
        assert_eq!(outcome.successful_strategy(), Some("markup"));
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.attempts_count(), 2);
    }

    #[test]
    fn test_fallback_on_error() {
        let pipeline = ExtractPipeline::with_strategies(vec![
            Box::new(FailingStrategy),
            Box::new(FixedStrategy::new("markup", ExtractKind::Markup, 1)),
        ]);

        let outcome = pipeline.execute(&empty_doc());
        assert_eq!(outcome.successful_strategy(), Some("markup"));
        assert_eq!(outcome.errors().len(), 1);
    }

    #[test]
    fn test_nothing_matches() {
        let pipeline = ExtractPipeline::with_strategies(vec![
            Box::new(FixedStrategy::new("jsonld", ExtractKind::StructuredData, 0)),
            Box::new(FixedStrategy::new("markup", ExtractKind::Markup, 0)),
        ]);

        let outcome = pipeline.execute(&empty_doc());
        assert!(outcome.is_empty());
        assert_eq!(outcome.attempts_count(), 2);
        assert!(outcome.errors().is_empty());
    }

    #[test]
    fn test_standard_pipeline_order() {
        let ids: Vec<String> = ExtractPipeline::standard()
            .strategy_info()
            .into_iter()
            .map(|info| info.id)
            .collect();
        assert_eq!(ids, vec!["jsonld", "markup"]);
    }
}
