//! Tokenizer contract consumed by the lexical classifier.
//!
//! The classifier does not know any language grammar. It asks a [`Tokenizer`] for a
//! [`TokenStream`] over the whole buffer, and for the [`KeywordSet`] used to tell keywords from
//! plain names.

use crate::category::LexicalCategory;
use thiserror::Error;

/// A zero-based `(line, column)` position. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextPosition {
    /// Zero-based physical line.
    pub line: usize,
    /// Zero-based character column.
    pub column: usize,
}

impl TextPosition {
    /// Create a position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Token kinds reported by a tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier or keyword.
    Name,
    /// Numeric literal.
    Number,
    /// String literal (may span lines).
    String,
    /// Operator or delimiter.
    Operator,
    /// Comment.
    Comment,
    /// End of a logical line.
    Newline,
    /// Line break that does not end a logical line (blank line, inside brackets).
    NonLogicalNewline,
    /// Indentation increase.
    Indent,
    /// Indentation decrease.
    Dedent,
    /// End of input.
    EndMarker,
    /// Text the tokenizer could not make sense of, reported with its position.
    Error,
}

/// A single token with its half-open span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Source text of the token.
    pub text: String,
    /// Start position (inclusive).
    pub start: TextPosition,
    /// End position (exclusive).
    pub end: TextPosition,
}

impl Token {
    /// Create a token.
    pub fn new(kind: TokenKind, text: impl Into<String>, start: TextPosition, end: TextPosition) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
            end,
        }
    }

    /// Whether the token covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Reasons a tokenizer stopped before the end of input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// End of input inside a multi-line string.
    #[error("EOF in multi-line string starting at {}:{}", .start.line, .start.column)]
    UnterminatedString {
        /// Where the string started.
        start: TextPosition,
    },
    /// End of input inside brackets or after a line continuation.
    #[error("EOF in multi-line statement at line {line}")]
    UnterminatedStatement {
        /// Line where input ended.
        line: usize,
    },
    /// A dedent that matches no outer indentation level.
    #[error("unindent does not match any outer indentation level at {}:{}", .at.line, .at.column)]
    InconsistentDedent {
        /// Position of the first non-blank character of the offending line.
        at: TextPosition,
    },
}

/// Output of a tokenizer run: every token produced before the end of input or the first
/// failure, and the failure if there was one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    /// Tokens in source order.
    pub tokens: Vec<Token>,
    /// Set when tokenization stopped early.
    pub failure: Option<TokenizeError>,
}

impl TokenStream {
    /// Whether the whole input was tokenized.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Keyword vocabulary used to classify `Name` tokens.
///
/// The primary and secondary sets are expected to be disjoint; if a name appears in both, the
/// primary set wins.
#[derive(Debug, Clone, Copy)]
pub struct KeywordSet {
    /// Structural/declarative keywords.
    pub primary: &'static [&'static str],
    /// Control-flow keywords.
    pub secondary: &'static [&'static str],
    /// Spelling of the boolean `true` literal.
    pub true_literal: &'static str,
    /// Spelling of the boolean `false` literal.
    pub false_literal: &'static str,
}

impl KeywordSet {
    /// Category of a name token.
    pub fn classify(&self, name: &str) -> LexicalCategory {
        if self.primary.contains(&name) {
            LexicalCategory::PrimaryKeyword
        } else if self.secondary.contains(&name) {
            LexicalCategory::SecondaryKeyword
        } else if name == self.true_literal {
            LexicalCategory::BoolTrue
        } else if name == self.false_literal {
            LexicalCategory::BoolFalse
        } else {
            LexicalCategory::Identifier
        }
    }
}

/// A language tokenizer.
pub trait Tokenizer {
    /// Tokenize the whole buffer. Must not panic on malformed input.
    fn tokenize(&self, text: &str) -> TokenStream;

    /// Keyword vocabulary for this language.
    fn keywords(&self) -> &KeywordSet;
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn tokenize(&self, text: &str) -> TokenStream {
        (**self).tokenize(text)
    }

    fn keywords(&self) -> &KeywordSet {
        (**self).keywords()
    }
}
