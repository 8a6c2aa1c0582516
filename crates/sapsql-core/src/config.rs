//! Checker configuration.

use serde::{Deserialize, Serialize};

use crate::parser::DEFAULT_MAX_DEPTH;

/// Options of a [`SqlChecker`](crate::checker::SqlChecker).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Whether to run the dialect preprocessor. `None` uses the dialect's
    /// default.
    pub preprocess: Option<bool>,

    /// Whether best-practice warnings are reported.
    pub emit_warnings: bool,

    /// Maximum nesting of expressions and subqueries.
    pub max_nesting_depth: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            preprocess: None,
            emit_warnings: true,
            max_nesting_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CheckerConfig {
    /// Forces preprocessing on or off.
    #[must_use]
    pub const fn with_preprocess(mut self, preprocess: bool) -> Self {
        self.preprocess = Some(preprocess);
        self
    }

    /// Enables or disables warnings.
    #[must_use]
    pub const fn with_warnings(mut self, emit_warnings: bool) -> Self {
        self.emit_warnings = emit_warnings;
        self
    }

    /// Sets the nesting limit.
    #[must_use]
    pub const fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckerConfig::default();
        assert_eq!(config.preprocess, None);
        assert!(config.emit_warnings);
        assert_eq!(config.max_nesting_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_builders() {
        let config = CheckerConfig::default()
            .with_preprocess(false)
            .with_warnings(false)
            .with_max_nesting_depth(8);
        assert_eq!(config.preprocess, Some(false));
        assert!(!config.emit_warnings);
        assert_eq!(config.max_nesting_depth, 8);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CheckerConfig = serde_json::from_str(r#"{"emit_warnings": false}"#).unwrap();
        assert_eq!(config.preprocess, None);
        assert!(!config.emit_warnings);
        assert_eq!(config.max_nesting_depth, DEFAULT_MAX_DEPTH);
    }
}
