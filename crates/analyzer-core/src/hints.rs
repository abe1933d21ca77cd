//! Lightweight declaration hints.
//!
//! Hints answer "what is declared on this line" without a scope rebuild. They come from a
//! single forward pass over a parse tree, independent of [`crate::scope`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a hint declares.
///
/// Serialized as its numeric [`code`](HintKind::code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum HintKind {
    /// No declaration.
    #[default]
    None,
    /// A module.
    Module,
    /// A function.
    Function,
    /// A class.
    Class,
}

impl HintKind {
    /// Stable numeric code (`0` none, `1` module, `2` function, `3` class).
    pub fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Module => 1,
            Self::Function => 2,
            Self::Class => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown hint kind code {0}")]
/// A numeric code that names no [`HintKind`].
pub struct UnknownHintKind(pub u8);

impl From<HintKind> for u8 {
    fn from(kind: HintKind) -> Self {
        kind.code()
    }
}

impl TryFrom<u8> for HintKind {
    type Error = UnknownHintKind;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Module),
            2 => Ok(Self::Function),
            3 => Ok(Self::Class),
            other => Err(UnknownHintKind(other)),
        }
    }
}

/// A declaration marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hint {
    /// Declaration kind.
    pub kind: HintKind,
    /// Zero-based line of the declaration.
    pub line: usize,
    /// Declared name.
    pub name: String,
}

impl Hint {
    /// A function declaration hint.
    pub fn function(line: usize, name: impl Into<String>) -> Self {
        Self {
            kind: HintKind::Function,
            line,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_as_code() {
        let hint = Hint::function(4, "main");
        let json = serde_json::to_value(&hint).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": 2, "line": 4, "name": "main" }));

        let back: Hint = serde_json::from_value(json).unwrap();
        assert_eq!(back, hint);
    }

    #[test]
    fn test_codes_are_stable() {
        let kinds = [HintKind::None, HintKind::Module, HintKind::Function, HintKind::Class];
        let codes: Vec<u8> = kinds.iter().map(|k| k.code()).collect();
        assert_eq!(codes, vec![0, 1, 2, 3]);
        assert_eq!(HintKind::try_from(3), Ok(HintKind::Class));
        assert_eq!(HintKind::try_from(4), Err(UnknownHintKind(4)));
    }
}
