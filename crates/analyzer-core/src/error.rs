use crate::service::SessionId;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors surfaced by the analyzer service.
///
/// Recoverable conditions inside an analysis (tokenizer failures, syntax errors, failing
/// checkers) never show up here; they degrade the result instead.
pub enum AnalyzerError {
    #[error("session {0} not found")]
    /// The session id is unknown (never created, or already destroyed).
    SessionNotFound(SessionId),

    #[error("language backend error: {0}")]
    /// The language backend could not be created.
    Backend(#[from] BackendError),

    #[error("configuration error: {0}")]
    /// A configuration document could not be parsed.
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    /// Filesystem I/O failed.
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced while setting up a language backend.
pub enum BackendError {
    #[error("failed to load grammar: {0}")]
    /// The parser grammar could not be loaded.
    Grammar(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced by checkers.
pub enum CheckerError {
    #[error("checker '{0}' is unavailable")]
    /// The checker cannot run in this environment.
    Unavailable(String),

    #[error("checker '{name}' failed: {message}")]
    /// The checker failed while producing diagnostics.
    Failed {
        /// Checker name.
        name: String,
        /// Failure description.
        message: String,
    },
}
