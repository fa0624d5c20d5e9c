//! Flashcard record types.
//!
//! - [`FlashcardRecord`] - A raw question/answer pair as scraped from a page
//! - [`StructuredRecord`] - A record whose question has been split into a stem
//!   and multiple-choice options
//! - [`OptionLabel`] - The fixed option alphabet (A–E)

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Flashcard Record
// ============================================================================

/// A raw question/answer pair produced by an extraction strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardRecord {
    /// Question text. May embed option lines such as `A) ...`.
    pub question: String,
    /// Answer text.
    pub answer: String,
}

impl FlashcardRecord {
    /// Creates a new record.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Builds a record from untrimmed text, returning `None` when either
    /// side is empty after trimming.
    pub fn from_parts(question: &str, answer: &str) -> Option<Self> {
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() || answer.is_empty() {
            return None;
        }
        Some(Self::new(question, answer))
    }

    /// Returns true if both sides carry text.
    pub fn is_complete(&self) -> bool {
        !self.question.trim().is_empty() && !self.answer.trim().is_empty()
    }
}

// ============================================================================
// Option Label
// ============================================================================

/// Label of a multiple-choice option.
///
/// Only five labels are recognized. A line starting with `F)` or later is
/// treated as ordinary question text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLabel {
    /// `A)`
    A,
    /// `B)`
    B,
    /// `C)`
    C,
    /// `D)`
    D,
    /// `E)`
    E,
}

impl OptionLabel {
    /// All labels in alphabet order.
    pub const ALL: [OptionLabel; 5] = [Self::A, Self::B, Self::C, Self::D, Self::E];

    /// Parses a label from its letter.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            _ => None,
        }
    }

    /// Returns the label letter.
    pub fn as_char(&self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// ============================================================================
// Structured Record
// ============================================================================

/// One labelled multiple-choice option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Option label.
    pub label: OptionLabel,
    /// Option text.
    pub text: String,
}

impl ChoiceOption {
    /// Creates a new option.
    pub fn new(label: OptionLabel, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
        }
    }
}

impl fmt::Display for ChoiceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}) {}", self.label, self.text)
    }
}

/// A flashcard after its question has been split into stem and options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredRecord {
    /// Question stem without option lines.
    pub question: String,
    /// Options in the order they appeared. Empty for open questions.
    pub options: Vec<ChoiceOption>,
    /// Answer text.
    pub answer: String,
}

impl StructuredRecord {
    /// Creates a record without options.
    pub fn open(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            options: Vec::new(),
            answer: answer.into(),
        }
    }

    /// Creates a record with options.
    pub fn with_options(
        question: impl Into<String>,
        options: Vec<ChoiceOption>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            options,
            answer: answer.into(),
        }
    }

    /// Returns true if the record has multiple-choice options.
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Renders the options as newline-joined `X) text` lines.
    ///
    /// Returns an empty string when there are no options.
    pub fn options_text(&self) -> String {
        self.options
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ============================================================================
// Tests
// ============================================================================
