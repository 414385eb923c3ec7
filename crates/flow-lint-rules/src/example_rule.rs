//! Reference implementation of the rule contract.
//!
//! Reports `example-error` against the main flow, then exercises the
//! internal-error fallback and the unknown-code path so every kind of
//! finding shows up in its result.
//!
//! A main flow without a `flowId` is treated as a failure of the rule: the
//! result holds a single internal-error entry instead of the three findings.

use flow_lint_core::{kinds, CodeDefinition, ConstructionError, ErrorProps, LintRule, RuleCore};
use thiserror::Error;

/// Rule id for example-rule.
pub const ID: &str = "example-rule";

/// Code reported against the main flow.
pub const EXAMPLE_ERROR: &str = "example-error";

/// Failures inside [`ExampleRule`] evaluation.
#[derive(Debug, Error)]
pub enum ExampleRuleError {
    /// Evaluated before flows were bound.
    #[error("no main flow bound")]
    NoMainFlow,
    /// The main flow has no `flowId`.
    #[error("main flow has no flowId")]
    MissingFlowId,
}

/// Example rule showing the shape every concrete rule follows.
#[derive(Debug)]
pub struct ExampleRule {
    core: RuleCore,
}

impl ExampleRule {
    /// Creates the rule and registers its codes.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] if the rule metadata is incomplete.
    pub fn new() -> Result<Self, ConstructionError> {
        let core = RuleCore::builder::<Self>()
            .id(ID)
            .description("Example Rule")
            .reference("https://example-reference-rule/doc")
            .cleans(false)
            .add_code(
                EXAMPLE_ERROR,
                CodeDefinition::new("Example Rule of flow '%'")
                    .description("Example Rule Description")
                    .kind(kinds::BEST_PRACTICE)
                    .recommendation("We recommend this example."),
            )
            .build()?;
        Ok(Self { core })
    }

    fn check(&mut self) -> Result<(), ExampleRuleError> {
        let flow = self.main_flow().cloned().ok_or(ExampleRuleError::NoMainFlow)?;
        let flow_id = flow.flow_id().ok_or(ExampleRuleError::MissingFlowId)?;

        self.add_error(
            Some(EXAMPLE_ERROR),
            ErrorProps::new().message_args([flow_id]).node_id("n1234"),
        );

        self.add_error(
            None,
            ErrorProps::new().message_args(["Testing undefined errors"]),
        );
        self.add_error(Some("unknown-code"), ErrorProps::new());
        Ok(())
    }
}

impl LintRule for ExampleRule {
    fn core(&self) -> &RuleCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut RuleCore {
        &mut self.core
    }

    fn run_rule(&mut self) {
        if let Err(err) = self.check() {
            tracing::debug!(rule = ID, error = %err, "example rule failed");
            self.report_failure(&err);
        }
    }
}
