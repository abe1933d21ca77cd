//! Incremental lexical classification.
//!
//! [`LexicalClassifier`] keeps a table of [`Line`]s and paints every character with a
//! [`CharClass`] derived from the tokens a [`Tokenizer`] reports for the whole buffer.
//!
//! Editing a single line re-tokenizes the whole buffer: tokens such as triple-quoted strings or
//! continued statements can cross line boundaries, so re-classifying only the edited line would
//! disagree with the rest of the table. Callers that need lower latency debounce edits.

use crate::category::{CharClass, LexicalCategory};
use crate::diagnostics::Diagnostic;
use crate::text::physical_lines;
use crate::token::{Token, TokenKind, Tokenizer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Origin name for diagnostics produced from tokenizer error tokens.
pub const TOKENIZER_ORIGIN: &str = "tokenizer";

/// Block nesting depth around a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LineRank {
    /// Indentation-block depth in effect for this line.
    pub enter: usize,
    /// Indentation-block depth in effect for the line after it.
    pub leave: usize,
}

impl LineRank {
    /// Create a rank pair.
    pub fn new(enter: usize, leave: usize) -> Self {
        Self { enter, leave }
    }
}

/// One physical line of the classified buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    text: String,
    categories: Vec<CharClass>,
    diagnostic: Option<Diagnostic>,
    rank: LineRank,
}

impl Line {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            categories: vec![CharClass::EMPTY; text.chars().count()],
            diagnostic: None,
            rank: LineRank::default(),
        }
    }

    fn reset(&mut self) {
        self.categories.fill(CharClass::EMPTY);
        self.diagnostic = None;
        self.rank = LineRank::default();
    }

    /// Raw line text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Per-character categories (one entry per `char` of [`Line::text`]).
    pub fn categories(&self) -> &[CharClass] {
        &self.categories
    }

    /// The diagnostic attached to this line, if any.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        self.diagnostic.as_ref()
    }

    /// Block nesting rank.
    pub fn rank(&self) -> LineRank {
        self.rank
    }
}

/// Classifies a buffer line by line using a full-buffer token stream.
#[derive(Debug, Clone)]
pub struct LexicalClassifier<T> {
    tokenizer: T,
    lines: Vec<Line>,
    logical_lines: usize,
}

impl<T: Tokenizer> LexicalClassifier<T> {
    /// Create an empty classifier.
    pub fn new(tokenizer: T) -> Self {
        Self {
            tokenizer,
            lines: Vec::new(),
            logical_lines: 0,
        }
    }

    /// Replace the whole buffer and classify it.
    pub fn load(&mut self, text: &str) {
        self.lines = physical_lines(text).map(|l| Line::new(l.content)).collect();
        self.retokenize(text);
    }

    /// Replace (or append) a single line and re-classify the buffer.
    ///
    /// `line_number` past the end appends exactly one line, whatever its value. Returns the
    /// categories of the edited line.
    pub fn replace_line(&mut self, line_number: usize, text: &str) -> Vec<CharClass> {
        let index = match self.lines.get_mut(line_number) {
            Some(line) => {
                *line = Line::new(text);
                line_number
            }
            None => {
                self.lines.push(Line::new(text));
                self.lines.len() - 1
            }
        };

        let full_text = self.text();
        self.retokenize(&full_text);
        self.lines[index].categories.clone()
    }

    /// Diagnostics attached to lines, in line order.
    pub fn errors(&self) -> Vec<Diagnostic> {
        self.lines
            .iter()
            .filter_map(|line| line.diagnostic.clone())
            .collect()
    }

    /// Per-line category arrays, in line order.
    pub fn line_categories(&self) -> Vec<Vec<CharClass>> {
        self.lines.iter().map(|line| line.categories.clone()).collect()
    }

    /// Per-line rank pairs, in line order.
    pub fn line_ranks(&self) -> Vec<LineRank> {
        self.lines.iter().map(|line| line.rank).collect()
    }

    /// The line table.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of physical lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of one line, without its terminator.
    pub fn line_text(&self, line_number: usize) -> Option<&str> {
        self.lines.get(line_number).map(|line| line.text.as_str())
    }

    /// Buffer text reassembled from the line table (lines joined with `\n`).
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Logical lines seen by the last tokenization. Advisory only.
    pub fn logical_line_count(&self) -> usize {
        self.logical_lines
    }

    fn retokenize(&mut self, text: &str) {
        for line in &mut self.lines {
            line.reset();
        }

        let stream = self.tokenizer.tokenize(text);
        let keywords = *self.tokenizer.keywords();

        let mut logical_lines = 0;
        let mut depth = 0usize;
        let mut depth_changes = BTreeMap::new();

        for token in &stream.tokens {
            match token.kind {
                TokenKind::Newline => logical_lines += 1,
                TokenKind::Indent => {
                    depth += 1;
                    depth_changes.insert(token.start.line, depth);
                }
                TokenKind::Dedent => {
                    depth = depth.saturating_sub(1);
                    depth_changes.insert(token.start.line, depth);
                }
                TokenKind::NonLogicalNewline | TokenKind::EndMarker => {}
                TokenKind::Name if !token.is_empty() => {
                    self.paint(token, keywords.classify(&token.text).into());
                }
                TokenKind::String => self.paint(token, LexicalCategory::Literal.into()),
                TokenKind::Number => self.paint(token, LexicalCategory::Number.into()),
                TokenKind::Comment => self.paint(token, LexicalCategory::Comment.into()),
                TokenKind::Operator => self.paint(token, LexicalCategory::Operator.into()),
                TokenKind::Error => {
                    if starts_with_quote(&token.text) {
                        self.paint(token, LexicalCategory::Literal.into());
                    }
                    self.attach_error(token);
                }
                TokenKind::Name => {}
            }
        }

        self.logical_lines = logical_lines;
        self.assign_ranks(&depth_changes);

        if let Some(failure) = &stream.failure {
            tracing::debug!(%failure, "tokenization stopped early, classification is partial");
        }
        tracing::debug!(
            lines = self.lines.len(),
            tokens = stream.tokens.len(),
            logical_lines,
            "classified buffer"
        );
    }

    fn paint(&mut self, token: &Token, class: CharClass) {
        for row in token.start.line..=token.end.line {
            let Some(line) = self.lines.get_mut(row) else {
                break;
            };
            let len = line.categories.len();
            let from = if row == token.start.line {
                token.start.column.min(len)
            } else {
                0
            };
            let to = if row == token.end.line {
                token.end.column.min(len)
            } else {
                len
            };
            if from < to {
                line.categories[from..to].fill(class);
            }
        }
    }

    fn attach_error(&mut self, token: &Token) {
        let row = token.start.line;
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        if line.diagnostic.is_some() {
            return;
        }

        let len = line.categories.len();
        let start = token.start.column.min(len);
        let end = if token.end.line == row {
            token.end.column.min(len)
        } else {
            len
        };
        let message = if starts_with_quote(&token.text) {
            "unterminated string literal".to_string()
        } else {
            format!("unexpected character {:?}", token.text)
        };
        line.diagnostic = Some(Diagnostic::new(
            TOKENIZER_ORIGIN,
            row,
            start,
            end.saturating_sub(start),
            message,
        ));
    }

    fn assign_ranks(&mut self, depth_changes: &BTreeMap<usize, usize>) {
        let mut depth = 0;
        let enters: Vec<usize> = (0..=self.lines.len())
            .map(|row| {
                if let Some(&changed) = depth_changes.get(&row) {
                    depth = changed;
                }
                depth
            })
            .collect();

        for (row, line) in self.lines.iter_mut().enumerate() {
            line.rank = LineRank::new(enters[row], enters[row + 1]);
        }
    }
}

fn starts_with_quote(text: &str) -> bool {
    text.trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .starts_with(['\'', '"'])
}
