//! Diagnostic code definitions and the per-rule code registry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known values for [`CodeDefinition::kind`].
///
/// The category is an open string; these are the values the framework
/// itself emits or falls back to.
pub mod kinds {
    /// Findings synthesized by the framework for rule failures and bad codes.
    pub const INTERNAL_ERROR: &str = "internal-error";
    /// Used when a code definition does not name a type.
    pub const UNKNOWN_TYPE: &str = "unknown-type";
    /// Conventional category for style and design findings.
    pub const BEST_PRACTICE: &str = "best-practice";
}

/// A diagnostic template a rule can emit, registered under a short code id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeDefinition {
    /// Code id, stamped when the definition is registered.
    #[serde(default)]
    pub code_id: String,
    /// Message template with positional placeholders.
    pub message: String,
    /// Recommendation template with positional placeholders.
    #[serde(default)]
    pub recommendation: String,
    /// Open category string (e.g. "best-practice").
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Human-readable description of what the code reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CodeDefinition {
    /// Creates a definition with the given message template.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code_id: String::new(),
            message: message.into(),
            recommendation: String::new(),
            kind: None,
            description: None,
        }
    }

    /// Sets the recommendation template.
    #[must_use]
    pub fn recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = recommendation.into();
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the category, or `"unknown-type"` when none was given.
    #[must_use]
    pub fn kind_or_unknown(&self) -> &str {
        self.kind.as_deref().unwrap_or(kinds::UNKNOWN_TYPE)
    }
}

/// Read-only mapping from code id to [`CodeDefinition`].
///
/// Populated while a rule is being built; once the rule exists the registry
/// can only be queried.
#[derive(Debug, Clone, Default)]
pub struct CodeRegistry {
    codes: BTreeMap<String, CodeDefinition>,
}

impl CodeRegistry {
    /// Registers `definition` under `code_id`, returning the replaced one.
    pub(crate) fn insert(
        &mut self,
        code_id: impl Into<String>,
        mut definition: CodeDefinition,
    ) -> Option<CodeDefinition> {
        let code_id = code_id.into();
        definition.code_id.clone_from(&code_id);
        self.codes.insert(code_id, definition)
    }

    /// Looks up a code by id.
    #[must_use]
    pub fn get(&self, code_id: &str) -> Option<&CodeDefinition> {
        self.codes.get(code_id)
    }

    /// Returns true if `code_id` is registered.
    #[must_use]
    pub fn contains(&self, code_id: &str) -> bool {
        self.codes.contains_key(code_id)
    }

    /// Number of registered codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if no codes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterates definitions ordered by code id.
    pub fn iter(&self) -> impl Iterator<Item = &CodeDefinition> {
        self.codes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_stamps_code_id() {
        let mut registry = CodeRegistry::default();
        registry.insert("missing-node", CodeDefinition::new("Node % missing"));

        let code = registry.get("missing-node").expect("registered");
        assert_eq!(code.code_id, "missing-node");
        assert!(registry.contains("missing-node"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn reinsert_overwrites() {
        let mut registry = CodeRegistry::default();
        assert!(registry
            .insert("dup", CodeDefinition::new("first"))
            .is_none());
        let previous = registry.insert("dup", CodeDefinition::new("second"));

        assert_eq!(previous.map(|c| c.message), Some("first".to_string()));
        assert_eq!(registry.get("dup").map(|c| c.message.as_str()), Some("second"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn kind_defaults_to_unknown_type() {
        let code = CodeDefinition::new("msg");
        assert_eq!(code.kind_or_unknown(), kinds::UNKNOWN_TYPE);
        assert_eq!(code.kind("best-practice").kind_or_unknown(), "best-practice");
    }

    #[test]
    fn iterates_in_code_order() {
        let mut registry = CodeRegistry::default();
        registry.insert("b-code", CodeDefinition::new("b"));
        registry.insert("a-code", CodeDefinition::new("a"));

        let ids: Vec<&str> = registry.iter().map(|c| c.code_id.as_str()).collect();
        assert_eq!(ids, vec!["a-code", "b-code"]);
    }
}
