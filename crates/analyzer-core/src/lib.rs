#![warn(missing_docs)]
//! Analyzer Core - headless source analysis for editors
//!
//! # Overview
//!
//! `analyzer-core` turns a buffer of source text into three editor-facing views:
//!
//! - a per-character lexical classification for highlighting ([`LexicalClassifier`])
//! - a tree of declared module/function/class names per scope for completion and outlines
//!   ([`ScopeTreeBuilder`])
//! - a merged, deduplicated diagnostic list, overlaid onto the classification as an error flag
//!   ([`merge_diagnostics`], [`overlay_errors`])
//!
//! The crate does not know any grammar. Tokenizing, parsing and checking are delegated to a
//! [`LanguageBackend`] and to [`Checker`]s; `analyzer-core-python` provides both for Python.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  AnalyzerService (session registry, config) │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  AnalyzerSession                            │  ← Per-buffer state
//! ├──────────────────────┬──────────────────────┤
//! │  LexicalClassifier   │  ScopeTreeBuilder    │  ← Derived views
//! │  + Diagnostic merger │  + Hints             │
//! ├──────────────────────┴──────────────────────┤
//! │  Tokenizer / ScopeTable / Checker traits    │  ← Language collaborators
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Module Description
//!
//! - [`category`] - per-character categories with an orthogonal error bit
//! - [`token`] - tokenizer contract
//! - [`classifier`] - line table and full-buffer re-classification
//! - [`scope`] - scope contexts and the baseline-preserving tree builder
//! - [`hints`] - lightweight declaration hints
//! - [`diagnostics`] - diagnostic model, merging and error overlay
//! - [`checker`] - pluggable checkers and availability probing
//! - [`session`] / [`service`] - per-buffer sessions and the registry that owns them

pub mod category;
pub mod checker;
pub mod classifier;
pub mod config;
pub mod diagnostics;
mod error;
pub mod hints;
pub mod language;
pub mod scope;
pub mod service;
pub mod session;
pub mod text;
pub mod token;

pub use category::{CharClass, LexicalCategory};
pub use checker::{
    CheckContext, Checker, CheckerCatalog, CheckerFactory, CheckerKind, run_checkers,
};
pub use classifier::{LexicalClassifier, Line, LineRank, TOKENIZER_ORIGIN};
pub use config::{AnalyzerConfig, DEFAULT_MAX_LINE_LENGTH};
pub use diagnostics::{Diagnostic, merge_diagnostics, overlay_errors};
pub use error::{AnalyzerError, BackendError, CheckerError};
pub use hints::{Hint, HintKind, UnknownHintKind};
pub use language::{LanguageBackend, ParsedSource};
pub use scope::{
    GlobalNames, HostNames, ScopeBaseline, ScopeContext, ScopeKind, ScopeSymbol, ScopeTable,
    ScopeTreeBuilder, SymbolKind,
};
pub use service::{AnalyzerService, BackendFactory, SessionId};
pub use session::AnalyzerSession;
pub use text::{PhysicalLine, physical_lines};
pub use token::{KeywordSet, TextPosition, Token, TokenKind, TokenStream, TokenizeError, Tokenizer};
