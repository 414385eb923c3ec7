//! Errors raised while building a rule.

use miette::Diagnostic;
use thiserror::Error;

/// A rule could not be constructed.
///
/// Fatal: the rule definition has to be fixed before it can run.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ConstructionError {
    /// A required metadata property was not set or was blank.
    #[error("LintRule: Property '{property}' is required in class {rule_type}")]
    #[diagnostic(
        code(flow_lint::construction::missing_property),
        help("set every required property on the rule builder before calling build()")
    )]
    MissingProperty {
        /// Name of the missing property.
        property: &'static str,
        /// Concrete rule type being built.
        rule_type: String,
    },
}
