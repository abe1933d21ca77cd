//! Session registry.
//!
//! [`AnalyzerService`] is the single owner of every [`AnalyzerSession`] and of the
//! [`AnalyzerConfig`]. Hosts address sessions by [`SessionId`]; an unknown id is the only hard
//! error a session call can return.
//!
//! All mutating calls take `&mut self`, so calls into the same session are serialized by the
//! borrow checker. There is no internal locking and no cancellation.

use crate::category::CharClass;
use crate::checker::{CheckerCatalog, CheckerFactory};
use crate::classifier::LineRank;
use crate::config::AnalyzerConfig;
use crate::diagnostics::Diagnostic;
use crate::error::{AnalyzerError, BackendError};
use crate::hints::Hint;
use crate::language::LanguageBackend;
use crate::scope::GlobalNames;
use crate::session::AnalyzerSession;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Opaque identifier for a session in an [`AnalyzerService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Constructor for a session's language backend.
pub type BackendFactory<B> = Box<dyn Fn() -> Result<B, BackendError> + Send + Sync>;

/// Owns all sessions and the shared configuration.
pub struct AnalyzerService<B: LanguageBackend> {
    config: AnalyzerConfig,
    backend_factory: BackendFactory<B>,
    checkers: CheckerCatalog,
    sessions: BTreeMap<SessionId, AnalyzerSession<B>>,
    next_id: u64,
}

impl<B: LanguageBackend> AnalyzerService<B> {
    /// Create a service.
    ///
    /// `checker_factories` is checked once here; unavailable checkers are left out of every
    /// session this service creates.
    pub fn new<F>(config: AnalyzerConfig, backend_factory: F, checker_factories: &[CheckerFactory]) -> Self
    where
        F: Fn() -> Result<B, BackendError> + Send + Sync + 'static,
    {
        Self {
            config,
            backend_factory: Box::new(backend_factory),
            checkers: CheckerCatalog::discover(checker_factories),
            sessions: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next `set_source_text` of each session.
    pub fn set_config(&mut self, config: AnalyzerConfig) {
        self.config = config;
    }

    /// Enable or disable style checkers for subsequent `set_source_text` calls.
    pub fn set_style_check_enabled(&mut self, enabled: bool) {
        self.config.style_check = enabled;
    }

    /// Checkers that proved available at construction.
    pub fn checker_catalog(&self) -> &CheckerCatalog {
        &self.checkers
    }

    /// Create a new, empty session.
    pub fn create_session(&mut self) -> Result<SessionId, AnalyzerError> {
        let backend = (self.backend_factory)()?;
        self.next_id += 1;
        let id = SessionId(self.next_id);
        self.sessions
            .insert(id, AnalyzerSession::new(backend, self.checkers.instantiate()));
        tracing::debug!(session = %id, "created session");
        Ok(id)
    }

    /// Destroy a session.
    pub fn destroy_session(&mut self, id: SessionId) -> Result<(), AnalyzerError> {
        if self.sessions.remove(&id).is_none() {
            return Err(AnalyzerError::SessionNotFound(id));
        }
        tracing::debug!(session = %id, "destroyed session");
        Ok(())
    }

    /// Ids of all live sessions, in creation order.
    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.keys().copied().collect()
    }

    /// Borrow a session.
    pub fn session(&self, id: SessionId) -> Result<&AnalyzerSession<B>, AnalyzerError> {
        self.sessions
            .get(&id)
            .ok_or(AnalyzerError::SessionNotFound(id))
    }

    fn session_mut(&mut self, id: SessionId) -> Result<&mut AnalyzerSession<B>, AnalyzerError> {
        self.sessions
            .get_mut(&id)
            .ok_or(AnalyzerError::SessionNotFound(id))
    }

    /// Record the source directory of a session's file.
    pub fn set_source_directory(
        &mut self,
        id: SessionId,
        dir: impl Into<PathBuf>,
    ) -> Result<(), AnalyzerError> {
        self.session_mut(id)?.set_source_directory(dir);
        Ok(())
    }

    /// Replace a session's text and run a full analysis.
    pub fn set_source_text(&mut self, id: SessionId, text: &str) -> Result<(), AnalyzerError> {
        let Self {
            config, sessions, ..
        } = self;
        let session = sessions
            .get_mut(&id)
            .ok_or(AnalyzerError::SessionNotFound(id))?;
        session.set_source_text(text, config);
        Ok(())
    }

    /// Replace one line of a session's buffer; returns that line's categories.
    pub fn replace_line(
        &mut self,
        id: SessionId,
        line_number: usize,
        text: &str,
    ) -> Result<Vec<CharClass>, AnalyzerError> {
        Ok(self.session_mut(id)?.replace_line(line_number, text))
    }

    /// Merged, deduplicated diagnostics.
    pub fn diagnostics(&self, id: SessionId) -> Result<Vec<Diagnostic>, AnalyzerError> {
        Ok(self.session(id)?.diagnostics())
    }

    /// Per-line categories with error overlay.
    pub fn line_categories(&self, id: SessionId) -> Result<Vec<Vec<CharClass>>, AnalyzerError> {
        Ok(self.session(id)?.line_categories())
    }

    /// Per-line rank pairs.
    pub fn line_ranks(&self, id: SessionId) -> Result<Vec<LineRank>, AnalyzerError> {
        Ok(self.session(id)?.line_ranks())
    }

    /// Module-level names.
    pub fn global_names(&self, id: SessionId) -> Result<GlobalNames, AnalyzerError> {
        Ok(self.session(id)?.global_names())
    }

    /// Declaration hints.
    pub fn hints(&self, id: SessionId) -> Result<Vec<Hint>, AnalyzerError> {
        Ok(self.session(id)?.hints().to_vec())
    }
}
