//! Pluggable external checkers.
//!
//! A checker is configured with the full source text and then asked for its diagnostics. The
//! service knows the available checkers as a static list of [`CheckerFactory`] functions,
//! checked once by [`CheckerCatalog::discover`]; factories that fail at that point are dropped for
//! the lifetime of the catalog.

use crate::config::AnalyzerConfig;
use crate::diagnostics::Diagnostic;
use crate::error::CheckerError;
use std::path::Path;

/// Coarse checker category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckerKind {
    /// Correctness checks; always run.
    Lint,
    /// Style checks; run only when [`AnalyzerConfig::style_check`] is set.
    Style,
}

/// Ambient information passed to checkers alongside the source text.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// Directory of the analyzed file, if the host provided one.
    pub source_dir: Option<&'a Path>,
    /// Configuration in effect for this run.
    pub config: &'a AnalyzerConfig,
}

/// An external diagnostic producer.
pub trait Checker: Send {
    /// Name used as the origin of every diagnostic this checker reports.
    fn name(&self) -> &str;

    /// Category of this checker.
    fn kind(&self) -> CheckerKind {
        CheckerKind::Lint
    }

    /// Load the source text to check.
    fn configure(&mut self, text: &str, context: &CheckContext<'_>);

    /// Diagnostics for the configured text.
    fn diagnostics(&mut self) -> Result<Vec<Diagnostic>, CheckerError>;
}

/// Constructor for a checker. Returning an error marks the checker unavailable.
pub type CheckerFactory = fn() -> Result<Box<dyn Checker>, CheckerError>;

/// The set of checkers that proved available at startup.
#[derive(Debug, Clone, Default)]
pub struct CheckerCatalog {
    factories: Vec<CheckerFactory>,
}

impl CheckerCatalog {
    /// An empty catalog (no checkers).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Try every factory once and keep those that succeed.
    pub fn discover(factories: &[CheckerFactory]) -> Self {
        let mut available = Vec::new();
        for factory in factories {
            match factory() {
                Ok(checker) => {
                    tracing::info!(checker = checker.name(), "checker available");
                    available.push(*factory);
                }
                Err(err) => tracing::info!(%err, "skipping unavailable checker"),
            }
        }
        Self {
            factories: available,
        }
    }

    /// Number of available checkers.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no checker is available.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Fresh checker instances for a new session.
    pub fn instantiate(&self) -> Vec<Box<dyn Checker>> {
        self.factories
            .iter()
            .filter_map(|factory| match factory() {
                Ok(checker) => Some(checker),
                Err(err) => {
                    tracing::debug!(%err, "checker could not be instantiated");
                    None
                }
            })
            .collect()
    }
}

/// Run `checkers` over `text` and tag each diagnostic with its checker's name.
///
/// Style checkers are skipped unless enabled in `context.config`. A failing checker
/// contributes nothing.
pub fn run_checkers(
    checkers: &mut [Box<dyn Checker>],
    text: &str,
    context: &CheckContext<'_>,
) -> Vec<Vec<Diagnostic>> {
    let mut lists = Vec::new();
    for checker in checkers.iter_mut() {
        if checker.kind() == CheckerKind::Style && !context.config.style_check {
            continue;
        }

        checker.configure(text, context);
        match checker.diagnostics() {
            Ok(mut diagnostics) => {
                let origin = checker.name().to_string();
                for diagnostic in &mut diagnostics {
                    diagnostic.origin.clone_from(&origin);
                }
                tracing::debug!(checker = %origin, count = diagnostics.len(), "checker finished");
                lists.push(diagnostics);
            }
            Err(err) => tracing::warn!(%err, "checker failed, omitting its diagnostics"),
        }
    }
    lists
}
