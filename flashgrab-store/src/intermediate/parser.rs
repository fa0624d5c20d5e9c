//! Structured parser for intermediate logs.
//!
//! Parsing is total: text that does not form a complete block is skipped,
//! never reported as an error.

use flashgrab_core::{ChoiceOption, OptionLabel, StructuredRecord};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, instrument, warn};

use crate::error::StoreError;

static QUESTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Question (\d+): ").expect("Invalid regex"));

static ANSWER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Answer (\d+): ").expect("Invalid regex"));

static ESCAPED_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\\(\\*(?:Question|Answer) \d+: )").expect("Invalid regex")
});

static OPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-E])\)\s+(.+)$").expect("Invalid regex"));

/// Reads the log at `path` and parses it.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub async fn read_log(path: impl AsRef<Path>) -> Result<Vec<StructuredRecord>, StoreError> {
    let text = tokio::fs::read_to_string(path.as_ref()).await?;
    let records = parse_log(&text);
    debug!(records = records.len(), "Parsed intermediate log");
    Ok(records)
}

/// Parses log text into structured records, in log order.
///
/// A block is the text between a `Question n: ` marker and the next one.
/// Inside it, the first `Answer m: ` marker splits question from answer.
/// Blocks without an answer marker, with `m != n`, or with an empty side
/// are dropped.
pub fn parse_log(text: &str) -> Vec<StructuredRecord> {
    let markers: Vec<_> = QUESTION_RE.captures_iter(text).collect();
    let mut records = Vec::with_capacity(markers.len());

    for (index, caps) in markers.iter().enumerate() {
        let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let block_end = markers
            .get(index + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |m| m.start());
        let block = &text[whole.end()..block_end];

        let Some(answer) = ANSWER_RE.captures(block) else {
            warn!(number = number.as_str(), "Question without answer, skipping block");
            continue;
        };
        let (Some(answer_marker), Some(answer_number)) = (answer.get(0), answer.get(1)) else {
            continue;
        };
        if answer_number.as_str() != number.as_str() {
            warn!(
                question = number.as_str(),
                answer = answer_number.as_str(),
                "Mismatched block numbers, skipping block"
            );
            continue;
        }

        let question = block[..answer_marker.start()].trim();
        let answer_text = block[answer_marker.end()..].trim();
        if question.is_empty() || answer_text.is_empty() {
            debug!(number = number.as_str(), "Empty side, skipping block");
            continue;
        }

        let (stem, options) = split_options(&unescape_markers(question));
        records.push(StructuredRecord::with_options(
            stem,
            options,
            unescape_markers(answer_text),
        ));
    }

    records
}

/// Drops the backslash the writer puts in front of marker-like lines.
fn unescape_markers(text: &str) -> String {
    ESCAPED_MARKER_RE.replace_all(text, "$1").into_owned()
}

/// Splits question text into its stem and trailing option lines.
///
/// The options are the longest run of `X) text` lines (X in A–E) at the end
/// of the text. The first line is always part of the stem. Any line that
/// breaks the run, such as an `F)` line or a wrapped option, ends it.
pub fn split_options(question: &str) -> (String, Vec<ChoiceOption>) {
    let lines: Vec<&str> = question.lines().collect();

    let mut run_start = lines.len();
    let mut options = Vec::new();
    while run_start > 1 {
        let Some(option) = parse_option_line(lines[run_start - 1]) else {
            break;
        };
        options.push(option);
        run_start -= 1;
    }
    options.reverse();

    let stem = lines[..run_start].join("\n").trim().to_string();
    (stem, options)
}

fn parse_option_line(line: &str) -> Option<ChoiceOption> {
    let caps = OPTION_RE.captures(line.trim())?;
    let label = caps
        .get(1)?
        .as_str()
        .chars()
        .next()
        .and_then(OptionLabel::from_char)?;
    let text = caps.get(2)?.as_str().trim();
    Some(ChoiceOption::new(label, text))
}

// ============================================================================
// Tests
// ============================================================================
