//! Extraction strategy trait and types.
//!
//! A strategy represents one way of pulling flashcards out of a parsed page.
//! Pages can carry machine-readable metadata, plain markup, or both, so
//! several strategies are tried in priority order by the
//! [`ExtractPipeline`](crate::pipeline::ExtractPipeline).

use flashgrab_core::FlashcardRecord;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ExtractError;

// ============================================================================
// Extract Kind
// ============================================================================

/// The kind of page content a strategy reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractKind {
    /// Embedded JSON-LD structured data.
    StructuredData,
    /// Heuristics over HTML class names.
    Markup,
}

impl ExtractKind {
    /// Returns the display name for this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::StructuredData => "Structured Data",
            Self::Markup => "Markup",
        }
    }
}

impl fmt::Display for ExtractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Extract Strategy Trait
// ============================================================================

/// A strategy for extracting flashcards from one parsed page.
///
/// ## Implementing a Strategy
///
/// ```ignore
/// struct TitleStrategy;
///
/// impl ExtractStrategy for TitleStrategy {
///     fn id(&self) -> &str {
///         "title"
///     }
///
///     fn kind(&self) -> ExtractKind {
///         ExtractKind::Markup
///     }
///
///     fn extract(&self, doc: &Html) -> Result<Vec<FlashcardRecord>, ExtractError> {
///         // Select elements and build records
///     }
/// }
/// ```
pub trait ExtractStrategy: Send + Sync {
    /// Unique identifier for this strategy (e.g., "jsonld", "markup").
    fn id(&self) -> &str;

    /// The kind of content this strategy reads.
    fn kind(&self) -> ExtractKind;

    /// Extracts records from the page.
    ///
    /// Returns an empty list when the page has nothing this strategy
    /// recognizes. Only records with non-empty question and answer are
    /// returned.
    fn extract(&self, doc: &Html) -> Result<Vec<FlashcardRecord>, ExtractError>;

    /// Priority of this strategy (higher = try first).
    ///
    /// Default priorities:
    /// - Structured data: 100 (less ambiguous)
    /// - Markup: 50
    fn priority(&self) -> u32 {
        match self.kind() {
            ExtractKind::StructuredData => 100,
            ExtractKind::Markup => 50,
        }
    }
}

// ============================================================================
// Strategy Info
// ============================================================================

/// Information about a strategy (for reporting).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyInfo {
    /// Strategy ID.
    pub id: String,
    /// Strategy kind.
    pub kind: ExtractKind,
    /// Priority.
    pub priority: u32,
}

impl StrategyInfo {
    /// Creates strategy info from a strategy implementation.
    pub fn from_strategy(strategy: &dyn ExtractStrategy) -> Self {
        Self {
            id: strategy.id().to_string(),
            kind: strategy.kind(),
            priority: strategy.priority(),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Compiles a CSS selector, mapping failures to [`ExtractError`].
pub(crate) fn selector(source: &str) -> Result<Selector, ExtractError> {
    Selector::parse(source).map_err(|e| ExtractError::InvalidSelector {
        selector: source.to_string(),
        reason: e.to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================
