//! Engine configuration.

use crate::history::{DEFAULT_COALESCE_THRESHOLD, DEFAULT_HISTORY_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Tunables for history depth and typed-edit coalescing.
///
/// Missing fields fall back to their defaults, so `{}` is a valid configuration.
///
/// ```rust
/// use md_toolbar::EditorConfig;
///
/// let config = EditorConfig::from_json_str(r#"{ "history_limit": 100 }"#).unwrap();
/// assert_eq!(config.history_limit, 100);
/// assert_eq!(config.coalesce_threshold, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Maximum number of undo snapshots kept per buffer.
    pub history_limit: usize,
    /// Typed edits whose length delta exceeds this many characters get their own undo entry.
    pub coalesce_threshold: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            coalesce_threshold: DEFAULT_COALESCE_THRESHOLD,
        }
    }
}

/// Error loading an [`EditorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration is not valid JSON for [`EditorConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configuration parsed but holds an unusable value.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl EditorConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject values the engine cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid(
                "history_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.coalesce_threshold, 10);
    }

    #[test]
    fn test_zero_history_limit_is_invalid() {
        let err = EditorConfig::from_json_str(r#"{ "history_limit": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_huge_history_limit_builds_executor() {
        let config = EditorConfig::from_json_str(r#"{ "history_limit": 18446744073709551615 }"#)
            .unwrap();
        let mut executor = crate::ToolbarExecutor::with_config("x", config);
        executor.set_selection(0, 1).unwrap();
        assert!(
            executor
                .execute(crate::Command::Format(crate::Operation::Bold))
                .is_applied()
        );
        assert_eq!(executor.undo_depth(), 1);
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let err = EditorConfig::from_json_str(r#"{ "history": 3 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EditorConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
