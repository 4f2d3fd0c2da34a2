//! Parser configuration.
//!
//! Options can be built in code or read from a TOML document:
//!
//! ```toml
//! max_depth = 32
//! max_input_len = 4096
//! suggest_builtin_keys = false
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum parenthesis nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Errors that can occur while loading [`ParseOptions`].
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The options file could not be read.
    #[error("failed to read parser options: {0}")]
    Io(#[from] std::io::Error),

    /// The options document is not valid TOML for [`ParseOptions`].
    #[error("invalid parser options: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Limits and diagnostics for [`FilterParser`](super::FilterParser).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Maximum parenthesis nesting depth.
    pub max_depth: usize,

    /// Maximum input length in bytes. `None` means no limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_input_len: Option<usize>,

    /// Log a debug hint when a user-defined key looks like a misspelled
    /// built-in key.
    pub suggest_builtin_keys: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_len: None,
            suggest_builtin_keys: true,
        }
    }
}

impl ParseOptions {
    /// Parses options from a TOML document. Missing fields keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads options from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Sets the maximum parenthesis nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the maximum input length in bytes.
    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = Some(max_input_len);
        self
    }
}
