//! # flow-lint-rules
//!
//! Built-in lint rules for flow-lint.
//!
//! ## Available Rules
//!
//! | Id | Codes | Description |
//! |----|-------|-------------|
//! | `example-rule` | `example-error` | Reference rule exercising every reporting path |
//!
//! ## Usage
//!
//! ```ignore
//! use flow_lint_rules::{ExampleRule, LintRule};
//!
//! let mut rule = ExampleRule::new()?;
//! rule.set_flows(main_flow, all_flows);
//! rule.run_rule();
//! let result = rule.results();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod example_rule;

pub use example_rule::{ExampleRule, ExampleRuleError};

/// Re-export core types for convenience.
pub use flow_lint_core::{DiagnosticResult, ErrorProps, Flow, LintRule, LintRuleBox};
