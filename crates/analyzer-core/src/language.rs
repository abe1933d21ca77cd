//! Language backend interface.
//!
//! A backend bundles the per-language collaborators a session needs: a tokenizer for lexical
//! classification, the host builtin names that seed the scope tree, and a parser producing a
//! scope table plus declaration hints.

use crate::hints::Hint;
use crate::scope::{HostNames, ScopeTable};
use crate::token::Tokenizer;

/// Result of a successful parse.
#[derive(Debug, Clone)]
pub struct ParsedSource<T> {
    /// Root scope table (module scope).
    pub scopes: T,
    /// Function declaration hints, in source order.
    pub hints: Vec<Hint>,
}

/// Per-language collaborators for an analyzer session.
pub trait LanguageBackend: Send {
    /// Tokenizer type used by the lexical classifier.
    type Tokenizer: Tokenizer + Send;
    /// Scope table type produced by [`LanguageBackend::parse`].
    type ScopeTable: ScopeTable;

    /// A tokenizer for a new session.
    fn tokenizer(&self) -> Self::Tokenizer;

    /// Builtin names that form the root scope's baseline.
    fn host_names(&self) -> HostNames;

    /// Parse `text`. Returns `None` when the text has syntax errors.
    fn parse(&mut self, text: &str) -> Option<ParsedSource<Self::ScopeTable>>;
}
