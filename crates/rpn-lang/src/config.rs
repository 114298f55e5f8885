//! Interpreter configuration (TOML).

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::interp::DEFAULT_MAX_CALL_DEPTH;

/// Limits, initial trace state and start-up lines for an interpreter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterpConfig {
    /// Maximum stack depth; absent means unbounded.
    pub max_stack_depth: Option<usize>,

    /// Nesting limit for compiled-word calls.
    pub max_call_depth: usize,

    /// Initial `TRACE` state.
    pub trace: bool,

    /// Lines evaluated at start-up, in order.
    pub prelude: Vec<String>,
}

impl Default for InterpConfig {
    fn default() -> Self {
        Self {
            max_stack_depth: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            trace: false,
            prelude: Vec::new(),
        }
    }
}

impl InterpConfig {
    /// Load a config from a file path.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_owned(),
            source: e,
        })?;

        Self::from_str(&content, path)
    }

    /// Parse a config from a string; `path` is only used in errors.
    pub fn from_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: InterpConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })?;

        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::Invalid {
            path: path.to_owned(),
            reason: reason.to_string(),
        };
        if self.max_stack_depth == Some(0) {
            return Err(invalid("max_stack_depth must be at least 1"));
        }
        if self.max_call_depth == 0 {
            return Err(invalid("max_call_depth must be at least 1"));
        }
        if let Some(index) = self.prelude.iter().position(|line| line.trim().is_empty()) {
            return Err(invalid(&format!("prelude line {index} is empty")));
        }
        Ok(())
    }
}
