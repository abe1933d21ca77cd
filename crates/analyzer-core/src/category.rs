//! Per-character lexical categories.
//!
//! Every character of every line carries one [`CharClass`]: a [`LexicalCategory`] tag in the low
//! bits plus an orthogonal [`CharClass::ERROR`] bit. Overlaying an error never erases the
//! underlying category; both remain recoverable from the combined value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// The syntactic role of a character position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum LexicalCategory {
    /// Not classified (whitespace, structural tokens, or text past a tokenizer failure).
    #[default]
    Empty = 0,
    /// Structural/declarative keyword (`def`, `class`, `import`, ...).
    PrimaryKeyword = 1,
    /// Control-flow keyword (`if`, `return`, `and`, ...).
    SecondaryKeyword = 2,
    /// Any other name.
    Identifier = 3,
    /// The boolean `true` literal of the language.
    BoolTrue = 4,
    /// The boolean `false` literal of the language.
    BoolFalse = 5,
    /// String literal.
    Literal = 6,
    /// Numeric literal.
    Number = 7,
    /// Comment text.
    Comment = 8,
    /// Operator or delimiter.
    Operator = 9,
}

impl LexicalCategory {
    /// Decode a category tag. Unknown tags decode as [`LexicalCategory::Empty`].
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            1 => Self::PrimaryKeyword,
            2 => Self::SecondaryKeyword,
            3 => Self::Identifier,
            4 => Self::BoolTrue,
            5 => Self::BoolFalse,
            6 => Self::Literal,
            7 => Self::Number,
            8 => Self::Comment,
            9 => Self::Operator,
            _ => Self::Empty,
        }
    }

    /// The numeric tag stored in the low bits of a [`CharClass`].
    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// A character's classification: category tag plus an error flag.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharClass(u16);

impl CharClass {
    /// Unclassified character.
    pub const EMPTY: Self = Self(0);
    /// The error overlay bit.
    pub const ERROR: Self = Self(0x8000);

    const TAG_MASK: u16 = 0x00ff;

    /// Build a class carrying `category` and no error flag.
    pub const fn new(category: LexicalCategory) -> Self {
        Self(category as u16)
    }

    /// Rebuild a class from its raw bits.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Raw bits (category tag in the low byte, error flag in the top bit).
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// The category tag, ignoring the error flag.
    pub fn category(self) -> LexicalCategory {
        LexicalCategory::from_tag((self.0 & Self::TAG_MASK) as u8)
    }

    /// Whether the error overlay bit is set.
    pub fn has_error(self) -> bool {
        self.0 & Self::ERROR.0 != 0
    }

    /// Same category with the error bit set.
    pub fn with_error(self) -> Self {
        self | Self::ERROR
    }

    /// Whether this character has no category and no error.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<LexicalCategory> for CharClass {
    fn from(category: LexicalCategory) -> Self {
        Self::new(category)
    }
}

impl BitOr for CharClass {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CharClass {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_error() {
            write!(f, "{:?}|Error", self.category())
        } else {
            write!(f, "{:?}", self.category())
        }
    }
}
