//! The rule contract and the shared state every rule owns.

use crate::code::{CodeDefinition, CodeRegistry};
use crate::error::ConstructionError;
use crate::exclude::parse_exclude_spec;
use crate::flow::{Flow, FlowContext};
use crate::result::{DiagnosticResult, ErrorProps};
use crate::template::Template;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Builder collecting a rule's required metadata and its codes.
///
/// Obtained from [`RuleCore::builder`]. Codes can only be registered here,
/// so the registry is sealed once [`RuleCoreBuilder::build`] returns.
#[derive(Debug)]
#[must_use]
pub struct RuleCoreBuilder {
    rule_type: String,
    id: Option<String>,
    description: Option<String>,
    reference: Option<String>,
    cleans: Option<bool>,
    codes: CodeRegistry,
    template: Template,
}

impl RuleCoreBuilder {
    /// Sets the unique rule id (e.g. "example-rule").
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the rule description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the documentation reference URI.
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Declares whether the rule reports clean confirmations.
    pub fn cleans(mut self, cleans: bool) -> Self {
        self.cleans = Some(cleans);
        self
    }

    /// Uses `token` instead of `%` as the template placeholder.
    pub fn placeholder(mut self, token: impl Into<String>) -> Self {
        self.template = Template::new(token);
        self
    }

    /// Registers a code. Registering the same id again replaces it.
    pub fn add_code(mut self, code_id: impl Into<String>, definition: CodeDefinition) -> Self {
        let code_id = code_id.into();
        if self.codes.insert(code_id.as_str(), definition).is_some() {
            debug!(rule_type = %self.rule_type, code = %code_id, "code registered twice, keeping last");
        }
        self
    }

    /// Validates the metadata and seals the code registry.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::MissingProperty`] for the first of `id`,
    /// `description`, `reference`, `cleans` that was not set. Blank strings
    /// count as missing.
    pub fn build(self) -> Result<RuleCore, ConstructionError> {
        let id = required(self.id, "id", &self.rule_type)?;
        let description = required(self.description, "description", &self.rule_type)?;
        let reference = required(self.reference, "reference", &self.rule_type)?;
        let cleans = self.cleans.ok_or_else(|| ConstructionError::MissingProperty {
            property: "cleans",
            rule_type: self.rule_type.clone(),
        })?;

        let result = fresh_result(&id, &description, &self.template);
        Ok(RuleCore {
            id,
            description,
            reference,
            cleans,
            codes: self.codes,
            template: self.template,
            result,
            flows: None,
            excluded_codes: BTreeSet::new(),
        })
    }
}

fn required(
    value: Option<String>,
    property: &'static str,
    rule_type: &str,
) -> Result<String, ConstructionError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConstructionError::MissingProperty {
            property,
            rule_type: rule_type.to_string(),
        }),
    }
}

fn fresh_result(id: &str, description: &str, template: &Template) -> DiagnosticResult {
    DiagnosticResult::new(id, description).with_template(template.clone())
}

fn short_type_name<R: ?Sized>() -> String {
    let full = std::any::type_name::<R>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path).to_string()
}

/// State shared by every rule: metadata, codes, exclusions, flows and the
/// current result.
#[derive(Debug)]
pub struct RuleCore {
    id: String,
    description: String,
    reference: String,
    cleans: bool,
    codes: CodeRegistry,
    template: Template,
    result: DiagnosticResult,
    flows: Option<FlowContext>,
    excluded_codes: BTreeSet<String>,
}

impl RuleCore {
    /// Starts building the core of rule type `R`.
    ///
    /// `R` only names the rule in construction errors.
    pub fn builder<R: ?Sized>() -> RuleCoreBuilder {
        RuleCoreBuilder {
            rule_type: short_type_name::<R>(),
            id: None,
            description: None,
            reference: None,
            cleans: None,
            codes: CodeRegistry::default(),
            template: Template::default(),
        }
    }

    /// Rule id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Rule description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Documentation reference.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Whether the rule reports clean confirmations.
    #[must_use]
    pub fn cleans(&self) -> bool {
        self.cleans
    }

    /// Registered codes.
    #[must_use]
    pub fn codes(&self) -> &CodeRegistry {
        &self.codes
    }

    /// Codes currently suppressed for this rule.
    #[must_use]
    pub fn excluded_codes(&self) -> &BTreeSet<String> {
        &self.excluded_codes
    }

    /// Bound flows, if [`RuleCore::set_flows`] was called.
    #[must_use]
    pub fn flows(&self) -> Option<&FlowContext> {
        self.flows.as_ref()
    }

    /// Replaces the result with a fresh one for the same rule.
    ///
    /// The new result has no default flow id until flows are bound again.
    pub fn clear(&mut self) {
        debug!(rule = %self.id, "clearing result");
        self.result = fresh_result(&self.id, &self.description, &self.template);
    }

    /// Binds the flows to evaluate and uses the main flow's id as the
    /// result's default flow id.
    pub fn set_flows(&mut self, main_flow: Arc<Flow>, all_flows: Vec<Arc<Flow>>) {
        let flow_id = main_flow.flow_id().map(str::to_string);
        debug!(rule = %self.id, flow = ?flow_id, flows = all_flows.len(), "binding flows");
        self.result.set_flow_id(flow_id);
        self.flows = Some(FlowContext::new(main_flow, all_flows));
    }

    /// Replaces the suppressed codes from a `ruleId.codeId[,...]` spec.
    ///
    /// Only pairs naming this rule and a registered code are kept; others
    /// are ignored so one spec can be shared by many rules. Malformed tokens
    /// log a warning, unregistered codes for this rule only a debug line.
    pub fn set_exclude_codes(&mut self, spec: &str) {
        self.excluded_codes.clear();

        for token in parse_exclude_spec(spec) {
            if token.rule_id != self.id {
                continue;
            }
            if self.codes.contains(token.code_id) {
                self.excluded_codes.insert(token.code_id.to_string());
            } else {
                debug!(
                    rule = %self.id,
                    code = token.code_id,
                    "exclude spec names a code this rule does not register"
                );
            }
        }
    }

    /// Reports a finding for `code_id`.
    ///
    /// Resolution order:
    /// 1. an excluded code is recorded as suppressed and nothing else happens;
    /// 2. a registered code is rendered from its definition;
    /// 3. an unregistered code becomes an unknown-code internal error;
    /// 4. `None` or an empty id becomes the internal-error fallback built
    ///    from `props`.
    pub fn add_error(&mut self, code_id: Option<&str>, props: ErrorProps) {
        match code_id {
            None | Some("") => self.result.add_error(None, props),
            Some(code_id) if self.excluded_codes.contains(code_id) => {
                debug!(rule = %self.id, code = code_id, "finding suppressed by exclusion");
                self.result.add_excluded_code(code_id);
            }
            Some(code_id) => match self.codes.get(code_id) {
                Some(code) => self.result.add_error(Some(code), props),
                None => self.result.add_unknown_code_error(code_id),
            },
        }
    }

    /// Current result.
    #[must_use]
    pub fn results(&self) -> &DiagnosticResult {
        &self.result
    }

    /// Sets the result's clean flag.
    pub fn set_clean(&mut self, clean: bool) {
        self.result.set_clean(clean);
    }

    /// Adds a clean confirmation to the result.
    pub fn add_clean_result(&mut self, message: &str) {
        self.result.add_clean(message);
    }
}

/// A lint rule evaluated against one or more flows.
///
/// Implementors own a [`RuleCore`] built in their constructor and supply
/// [`LintRule::run_rule`]; everything else is provided.
///
/// A driver builds the rule, calls [`LintRule::set_flows`] (and optionally
/// [`LintRule::set_exclude_codes`]), calls [`LintRule::run_rule`], then reads
/// [`LintRule::results`]. Call [`LintRule::clear`] before evaluating again.
/// Reporting before flows are bound is allowed but produces entries without
/// a flow id.
///
/// One evaluation may be in flight per instance. Distinct instances share
/// nothing and can run on different threads.
pub trait LintRule: Send {
    /// Shared rule state.
    fn core(&self) -> &RuleCore;

    /// Shared rule state, mutably.
    fn core_mut(&mut self) -> &mut RuleCore;

    /// Evaluates the bound flows, reporting through [`LintRule::add_error`]
    /// and [`LintRule::add_clean_result`].
    ///
    /// Must not panic: failures inside the rule are reported with
    /// [`LintRule::report_failure`] so other rules still produce results.
    fn run_rule(&mut self);

    /// Rule id.
    fn id(&self) -> &str {
        self.core().id()
    }

    /// Rule description.
    fn description(&self) -> &str {
        self.core().description()
    }

    /// Documentation reference.
    fn reference(&self) -> &str {
        self.core().reference()
    }

    /// Whether the rule reports clean confirmations.
    fn cleans(&self) -> bool {
        self.core().cleans()
    }

    /// Registered codes.
    fn codes(&self) -> &CodeRegistry {
        self.core().codes()
    }

    /// Discards the current result. See [`RuleCore::clear`].
    fn clear(&mut self) {
        self.core_mut().clear();
    }

    /// Binds the flows to evaluate. See [`RuleCore::set_flows`].
    fn set_flows(&mut self, main_flow: Arc<Flow>, all_flows: Vec<Arc<Flow>>) {
        self.core_mut().set_flows(main_flow, all_flows);
    }

    /// Sets suppressed codes. See [`RuleCore::set_exclude_codes`].
    fn set_exclude_codes(&mut self, spec: &str) {
        self.core_mut().set_exclude_codes(spec);
    }

    /// Reports a finding. See [`RuleCore::add_error`].
    fn add_error(&mut self, code_id: Option<&str>, props: ErrorProps) {
        self.core_mut().add_error(code_id, props);
    }

    /// Reports a failure of the rule itself as an internal-error finding.
    fn report_failure(&mut self, error: &dyn fmt::Display) {
        self.add_error(None, ErrorProps::new().message_args([error.to_string()]));
    }

    /// Current result, valid until the next [`LintRule::clear`].
    fn results(&self) -> &DiagnosticResult {
        self.core().results()
    }

    /// Sets the result's clean flag.
    fn set_clean(&mut self, clean: bool) {
        self.core_mut().set_clean(clean);
    }

    /// Adds a clean confirmation to the result.
    fn add_clean_result(&mut self, message: &str) {
        self.core_mut().add_clean_result(message);
    }

    /// The main flow, once bound.
    fn main_flow(&self) -> Option<&Arc<Flow>> {
        self.core().flows().map(|f| &f.main_flow)
    }

    /// All bound flows, main flow included.
    fn all_flows(&self) -> &[Arc<Flow>] {
        match self.core().flows() {
            Some(flows) => &flows.all_flows,
            None => &[],
        }
    }
}

/// Type alias for boxed [`LintRule`] trait objects.
pub type LintRuleBox = Box<dyn LintRule>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct NamingRule {
        core: RuleCore,
    }

    impl NamingRule {
        fn new() -> Result<Self, ConstructionError> {
            let core = RuleCore::builder::<Self>()
                .id("naming-rule")
                .description("Node names")
                .reference("https://example.test/naming")
                .cleans(true)
                .add_code(
                    "bad-name",
                    CodeDefinition::new("Node '%' has a bad name").kind("best-practice"),
                )
                .build()?;
            Ok(Self { core })
        }
    }

    impl LintRule for NamingRule {
        fn core(&self) -> &RuleCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut RuleCore {
            &mut self.core
        }

        fn run_rule(&mut self) {
            self.add_error(Some("bad-name"), ErrorProps::new().message_args(["n1"]));
        }
    }

    #[test]
    fn builder_reports_first_missing_property() {
        let err = RuleCore::builder::<NamingRule>()
            .description("d")
            .build()
            .expect_err("id missing");
        assert_eq!(
            err,
            ConstructionError::MissingProperty {
                property: "id",
                rule_type: "NamingRule".to_string(),
            }
        );
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = RuleCore::builder::<NamingRule>()
            .id("x")
            .description("   ")
            .reference("r")
            .cleans(false)
            .build()
            .expect_err("blank description");
        assert!(matches!(
            err,
            ConstructionError::MissingProperty {
                property: "description",
                ..
            }
        ));
    }

    #[test]
    fn cleans_is_required() {
        let err = RuleCore::builder::<NamingRule>()
            .id("x")
            .description("d")
            .reference("r")
            .build()
            .expect_err("cleans missing");
        assert!(err.to_string().contains("'cleans'"));
    }

    #[test]
    fn reference_is_required() {
        let err = RuleCore::builder::<NamingRule>()
            .id("naming-rule")
            .description("Node names")
            .cleans(true)
            .build()
            .expect_err("reference missing");
        assert_eq!(
            err,
            ConstructionError::MissingProperty {
                property: "reference",
                rule_type: "NamingRule".to_string(),
            }
        );
        let message = err.to_string();
        assert!(message.contains("'reference'"));
        assert!(message.contains("NamingRule"));
    }

    #[test]
    fn generic_rule_types_are_named_without_arguments() {
        #[allow(dead_code)]
        struct Wrapper<T>(T);

        assert_eq!(short_type_name::<Wrapper<NamingRule>>(), "Wrapper");
        assert_eq!(short_type_name::<NamingRule>(), "NamingRule");

        let err = RuleCore::builder::<Wrapper<NamingRule>>()
            .build()
            .expect_err("id missing");
        assert!(err.to_string().ends_with("in class Wrapper"));
    }

    #[test]
    fn empty_code_id_takes_fallback() {
        let mut rule = NamingRule::new().expect("valid rule");
        rule.add_error(Some(""), ErrorProps::new().message_args(["boom"]));

        let result = rule.results();
        assert_eq!(result.error_count(), 1);
        let entry = &result.entries()[0];
        assert_eq!(entry.code_id, "ruleId-naming-rule");
        assert_eq!(entry.message, "Unknown Error [ruleId:naming-rule]: boom");
    }

    #[test]
    fn metadata_is_exposed_through_the_trait() {
        let rule = NamingRule::new().expect("valid rule");
        assert_eq!(rule.id(), "naming-rule");
        assert_eq!(rule.description(), "Node names");
        assert_eq!(rule.reference(), "https://example.test/naming");
        assert!(rule.cleans());
        assert_eq!(rule.codes().len(), 1);
        assert!(rule.main_flow().is_none());
        assert!(rule.all_flows().is_empty());
    }

    #[test]
    fn set_flows_propagates_flow_id() {
        let mut rule = NamingRule::new().expect("valid rule");
        let flow = Arc::new(Flow::new(json!({ "flowId": "f1" })));
        rule.set_flows(Arc::clone(&flow), vec![Arc::clone(&flow)]);

        assert_eq!(rule.results().flow_id(), Some("f1"));
        assert_eq!(rule.all_flows().len(), 1);

        rule.run_rule();
        assert_eq!(rule.results().entries()[0].flow_id.as_deref(), Some("f1"));
    }

    #[test]
    fn exclude_codes_only_keeps_own_registered_codes() {
        let mut rule = NamingRule::new().expect("valid rule");
        rule.set_exclude_codes("other-rule.bad-name,naming-rule.unknown,naming-rule.bad-name");

        let excluded: Vec<&str> = rule
            .core()
            .excluded_codes()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(excluded, vec!["bad-name"]);

        rule.set_exclude_codes("");
        assert!(rule.core().excluded_codes().is_empty());
    }

    #[test]
    fn placeholder_token_survives_clear() {
        let core = RuleCore::builder::<NamingRule>()
            .id("braces")
            .description("d")
            .reference("r")
            .cleans(false)
            .placeholder("{}")
            .add_code("c", CodeDefinition::new("value {} at 100%"))
            .build();
        let mut rule = NamingRule {
            core: core.expect("valid core"),
        };

        rule.clear();
        rule.add_error(Some("c"), ErrorProps::new().message_args(["7"]));
        assert_eq!(rule.results().entries()[0].message, "value 7 at 100%");
    }

    #[test]
    fn report_failure_uses_fallback() {
        let mut rule = NamingRule::new().expect("valid rule");
        rule.report_failure(&"index out of range");

        let entry = &rule.results().entries()[0];
        assert_eq!(entry.code_id, "ruleId-naming-rule");
        assert_eq!(
            entry.message,
            "Unknown Error [ruleId:naming-rule]: index out of range"
        );
    }

    #[test]
    fn rule_is_object_safe() {
        let mut rules: Vec<LintRuleBox> = vec![Box::new(NamingRule::new().expect("valid rule"))];
        for rule in &mut rules {
            rule.run_rule();
        }
        assert_eq!(rules[0].results().error_count(), 1);
    }
}
