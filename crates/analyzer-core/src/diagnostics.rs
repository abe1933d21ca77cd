//! Diagnostics data model and merging.
//!
//! Diagnostics come from two kinds of producers:
//! - the lexical classifier (positioned error tokens reported by the tokenizer)
//! - external checkers (see [`crate::checker`])
//!
//! [`merge_diagnostics`] combines them into one deduplicated list, and [`overlay_errors`] maps
//! the merged list back onto per-character categories as an error flag.

use crate::category::CharClass;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A positioned error report.
///
/// Equality is structural: two diagnostics with the same origin, position, length and message
/// are the same diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Name of the producer that reported it (e.g. `"tokenizer"`, `"pep8"`).
    pub origin: String,
    /// Zero-based line number.
    pub line: usize,
    /// Zero-based start column, in characters.
    pub start: usize,
    /// Length in characters.
    pub length: usize,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic.
    pub fn new(
        origin: impl Into<String>,
        line: usize,
        start: usize,
        length: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            line,
            start,
            length,
            message: message.into(),
        }
    }

    /// Column one past the last covered character.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.length)
    }
}

/// Merge classifier diagnostics with any number of checker lists.
///
/// Order is preserved (classifier first, then each list in turn); structural duplicates keep
/// their first occurrence only.
pub fn merge_diagnostics<I>(classifier: &[Diagnostic], checker_lists: I) -> Vec<Diagnostic>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = Diagnostic>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    let all = classifier
        .iter()
        .cloned()
        .chain(checker_lists.into_iter().flatten());
    for diagnostic in all {
        if seen.insert(diagnostic.clone()) {
            out.push(diagnostic);
        }
    }
    out
}

/// Set the error bit on every character covered by a diagnostic.
///
/// Diagnostics on lines outside `categories`, or whose `start..start + length` range does not
/// fit inside the line, are skipped rather than truncated.
pub fn overlay_errors(categories: &mut [Vec<CharClass>], diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let Some(line) = categories.get_mut(diagnostic.line) else {
            continue;
        };
        let end = diagnostic.end();
        if end > line.len() {
            continue;
        }
        for class in &mut line[diagnostic.start..end] {
            *class |= CharClass::ERROR;
        }
    }
}
