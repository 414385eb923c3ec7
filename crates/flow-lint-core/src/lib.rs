//! # flow-lint-core
//!
//! Core framework for linting flow definitions.
//!
//! This crate provides the contract concrete rules implement and the result
//! every rule fills. It includes:
//!
//! - [`LintRule`] trait and the [`RuleCore`] state each rule owns
//! - [`CodeDefinition`] and the sealed [`CodeRegistry`]
//! - [`DiagnosticResult`] for accumulating normalized findings
//! - [`Config`] for exclusion settings
//!
//! ## Example
//!
//! ```ignore
//! use flow_lint_core::{CodeDefinition, ConstructionError, ErrorProps, LintRule, RuleCore};
//!
//! pub struct MyRule { core: RuleCore }
//!
//! impl MyRule {
//!     pub fn new() -> Result<Self, ConstructionError> {
//!         let core = RuleCore::builder::<Self>()
//!             .id("my-rule")
//!             .description("My rule")
//!             .reference("https://example.com/my-rule")
//!             .cleans(false)
//!             .add_code("my-code", CodeDefinition::new("Flow '%' is bad"))
//!             .build()?;
//!         Ok(Self { core })
//!     }
//! }
//!
//! impl LintRule for MyRule {
//!     fn core(&self) -> &RuleCore { &self.core }
//!     fn core_mut(&mut self) -> &mut RuleCore { &mut self.core }
//!     fn run_rule(&mut self) {
//!         self.add_error(Some("my-code"), ErrorProps::new().message_args(["f1"]));
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod code;
mod config;
mod error;
mod exclude;
mod flow;
mod result;
mod rule;

/// Placeholder substitution used for code messages.
pub mod template;

pub use code::{kinds, CodeDefinition, CodeRegistry};
pub use config::{Config, ConfigError, RuleConfig};
pub use error::ConstructionError;
pub use exclude::{parse_exclude_spec, ExcludeToken};
pub use flow::{Flow, FlowContext};
pub use result::{
    DiagnosticEntry, DiagnosticResult, ErrorProps, FALLBACK_RECOMMENDATION,
    UNKNOWN_CODE_RECOMMENDATION,
};
pub use rule::{LintRule, LintRuleBox, RuleCore, RuleCoreBuilder};
pub use template::Template;
