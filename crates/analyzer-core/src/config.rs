//! Analyzer configuration.

use crate::error::AnalyzerError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default maximum line length for style checks.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 79;

/// Configuration shared by all sessions of an [`AnalyzerService`](crate::AnalyzerService).
///
/// The service reads it on every `set_source_text`, so changes apply to subsequent analyses of
/// every session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Whether checkers of kind [`CheckerKind::Style`](crate::CheckerKind::Style) run.
    pub style_check: bool,
    /// Maximum line length reported by style checkers.
    pub max_line_length: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            style_check: false,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

impl AnalyzerConfig {
    /// Default configuration (style checks off).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable style checks.
    pub fn with_style_check(mut self, enabled: bool) -> Self {
        self.style_check = enabled;
        self
    }

    /// Set the maximum line length for style checks.
    pub fn with_max_line_length(mut self, max: usize) -> Self {
        self.max_line_length = max;
        self
    }

    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, AnalyzerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AnalyzerError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
