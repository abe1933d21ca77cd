#![warn(missing_docs)]
//! `analyzer-core-python` - Python language backend for `analyzer-core`.
//!
//! This crate provides everything an [`analyzer_core::AnalyzerService`] needs to analyze
//! Python source:
//!
//! - [`PythonTokenizer`] - a `tokenize`-compatible scanner driving lexical classification
//! - [`PythonParser`] / [`PythonScopeTable`] - tree-sitter parsing into per-scope symbol tables
//! - [`function_hints`] - `def` declaration hints
//! - [`SyntaxChecker`], [`UnusedImportChecker`] and [`StyleChecker`] - built-in checkers
//!
//! # Example
//!
//! ```no_run
//! use analyzer_core::AnalyzerConfig;
//! use analyzer_core_python::python_service;
//!
//! let mut service = python_service(AnalyzerConfig::new().with_style_check(true));
//! let id = service.create_session()?;
//! service.set_source_text(id, "def f():\n    return True\n")?;
//! for diagnostic in service.diagnostics(id)? {
//!     println!("{}:{} {}", diagnostic.line, diagnostic.start, diagnostic.message);
//! }
//! # Ok::<(), analyzer_core::AnalyzerError>(())
//! ```

pub mod builtins;
pub mod checkers;
pub mod hints;
pub mod keywords;
pub mod parser;
pub mod tokenizer;

pub use checkers::{
    StyleChecker, SyntaxChecker, UnusedImportChecker, python_checkers, style_checker,
    syntax_checker, unused_import_checker,
};
pub use hints::function_hints;
pub use keywords::PYTHON_KEYWORDS;
pub use parser::{MODULE_SCOPE_NAME, PythonParser, PythonScopeTable};
pub use tokenizer::PythonTokenizer;

use analyzer_core::{
    AnalyzerConfig, AnalyzerService, BackendError, HostNames, LanguageBackend, ParsedSource,
};

/// Python collaborators for one analyzer session.
#[derive(Debug)]
pub struct PythonBackend {
    parser: PythonParser,
    tokenizer: PythonTokenizer,
}

impl PythonBackend {
    /// Create a backend with a fresh parser and tokenizer.
    pub fn new() -> Result<Self, BackendError> {
        let tokenizer =
            PythonTokenizer::new().map_err(|e| BackendError::Grammar(format!("token patterns: {e}")))?;
        Ok(Self {
            parser: PythonParser::new()?,
            tokenizer,
        })
    }
}

impl LanguageBackend for PythonBackend {
    type Tokenizer = PythonTokenizer;
    type ScopeTable = PythonScopeTable;

    fn tokenizer(&self) -> PythonTokenizer {
        self.tokenizer.clone()
    }

    fn host_names(&self) -> HostNames {
        builtins::host_names()
    }

    fn parse(&mut self, text: &str) -> Option<ParsedSource<PythonScopeTable>> {
        let tree = self.parser.parse(text)?;
        if tree.root_node().has_error() {
            tracing::debug!("source has syntax errors, skipping scope rebuild");
            return None;
        }
        Some(ParsedSource {
            scopes: PythonScopeTable::from_tree(&tree, text),
            hints: function_hints(&tree, text),
        })
    }
}

/// An [`AnalyzerService`] for Python with the built-in checkers.
pub fn python_service(config: AnalyzerConfig) -> AnalyzerService<PythonBackend> {
    AnalyzerService::new(config, PythonBackend::new, python_checkers())
}
