//! Configuration types for flow-lint.

use crate::rule::LintRule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Top-level configuration.
///
/// ```toml
/// exclude = ["example-rule.example-error"]
///
/// [rules.naming-rule]
/// exclude = ["bad-name"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// `ruleId.codeId` pairs to suppress.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Per-rule configurations, keyed by rule id.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Builds the `ruleId.codeId[,...]` spec accepted by
    /// [`LintRule::set_exclude_codes`], global entries first.
    #[must_use]
    pub fn exclude_spec(&self) -> String {
        let per_rule = self.rules.iter().flat_map(|(rule_id, rule)| {
            rule.exclude
                .iter()
                .map(move |code_id| format!("{rule_id}.{code_id}"))
        });

        self.exclude
            .iter()
            .cloned()
            .chain(per_rule)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Applies the exclusions to `rule`.
    pub fn apply(&self, rule: &mut dyn LintRule) {
        rule.set_exclude_codes(&self.exclude_spec());
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Code ids of this rule to suppress.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
