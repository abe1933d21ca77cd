//! A single analyzer session.
//!
//! A session owns everything it needs for one buffer: the lexical classifier, the scope tree,
//! the latest hints, its checker instances and their last diagnostics. Nothing is shared with
//! other sessions.

use crate::category::CharClass;
use crate::checker::{CheckContext, Checker, run_checkers};
use crate::classifier::{LexicalClassifier, LineRank};
use crate::config::AnalyzerConfig;
use crate::diagnostics::{Diagnostic, merge_diagnostics, overlay_errors};
use crate::hints::Hint;
use crate::language::LanguageBackend;
use crate::scope::{GlobalNames, ScopeContext, ScopeTreeBuilder};
use std::path::{Path, PathBuf};

/// Analysis state for one buffer.
pub struct AnalyzerSession<B: LanguageBackend> {
    backend: B,
    classifier: LexicalClassifier<B::Tokenizer>,
    scopes: ScopeTreeBuilder,
    hints: Vec<Hint>,
    checkers: Vec<Box<dyn Checker>>,
    checker_diagnostics: Vec<Vec<Diagnostic>>,
    source_dir: Option<PathBuf>,
    source_text: String,
}

impl<B: LanguageBackend> AnalyzerSession<B> {
    /// Create a session over `backend` with the given checker instances.
    pub fn new(backend: B, checkers: Vec<Box<dyn Checker>>) -> Self {
        let classifier = LexicalClassifier::new(backend.tokenizer());
        let scopes = ScopeTreeBuilder::new(&backend.host_names());
        Self {
            backend,
            classifier,
            scopes,
            hints: Vec::new(),
            checkers,
            checker_diagnostics: Vec::new(),
            source_dir: None,
            source_text: String::new(),
        }
    }

    /// Record the directory of the analyzed file. Forwarded to checkers only.
    pub fn set_source_directory(&mut self, dir: impl Into<PathBuf>) {
        self.source_dir = Some(dir.into());
    }

    /// Directory recorded by [`AnalyzerSession::set_source_directory`].
    pub fn source_directory(&self) -> Option<&Path> {
        self.source_dir.as_deref()
    }

    /// Replace the whole text: re-parse, re-classify and re-run checkers.
    ///
    /// On a syntax error the scope tree keeps its last good state and the hint list is empty.
    pub fn set_source_text(&mut self, text: &str, config: &AnalyzerConfig) {
        self.source_text = text.to_string();

        self.hints.clear();
        match self.backend.parse(text) {
            Some(parsed) => {
                self.scopes.rebuild(&parsed.scopes);
                self.hints = parsed.hints;
            }
            None => tracing::debug!("parse failed, keeping previous scope tree"),
        }

        self.checker_diagnostics.clear();
        self.classifier.load(text);

        if !text.is_empty() {
            let context = CheckContext {
                source_dir: self.source_dir.as_deref(),
                config,
            };
            self.checker_diagnostics = run_checkers(&mut self.checkers, text, &context);
        }
    }

    /// Replace (or append) one line and re-classify. Does not re-parse or re-run checkers.
    pub fn replace_line(&mut self, line_number: usize, text: &str) -> Vec<CharClass> {
        let categories = self.classifier.replace_line(line_number, text);
        self.source_text = self.classifier.text();
        categories
    }

    /// Classifier diagnostics followed by checker diagnostics, deduplicated.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        merge_diagnostics(&self.classifier.errors(), self.checker_diagnostics.iter().cloned())
    }

    /// Per-line categories with the error flag overlaid from [`AnalyzerSession::diagnostics`].
    pub fn line_categories(&self) -> Vec<Vec<CharClass>> {
        let mut categories = self.classifier.line_categories();
        overlay_errors(&mut categories, &self.diagnostics());
        categories
    }

    /// Per-line rank pairs.
    pub fn line_ranks(&self) -> Vec<LineRank> {
        self.classifier.line_ranks()
    }

    /// Copies of the module-level names.
    pub fn global_names(&self) -> GlobalNames {
        self.scopes.global_names()
    }

    /// The module-level scope context.
    pub fn global_scope(&self) -> &ScopeContext {
        self.scopes.root()
    }

    /// Function declaration hints from the last successful parse.
    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    /// The current buffer text.
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// The lexical classifier.
    pub fn classifier(&self) -> &LexicalClassifier<B::Tokenizer> {
        &self.classifier
    }
}
