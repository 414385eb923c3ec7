//! Diagnostic entries and the per-rule result accumulator.

use crate::code::{kinds, CodeDefinition};
use crate::template::Template;
use serde::Serialize;
use tracing::debug;

/// Recommendation attached to internal-error findings from failing rules.
pub const FALLBACK_RECOMMENDATION: &str =
    "Resolve error, exclude or ignore this rule for the flow.";

/// Recommendation attached to unknown-code findings.
pub const UNKNOWN_CODE_RECOMMENDATION: &str = "Correct rule to include valid code.";

/// One rendered finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticEntry {
    /// Code id of the finding.
    pub code_id: String,
    /// Rendered message.
    pub message: String,
    /// Category copied from the code definition.
    #[serde(rename = "type")]
    pub kind: String,
    /// Rendered recommendation.
    pub recommendation: String,
    /// Flow the finding belongs to; absent if no flow context was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<String>,
    /// Node the finding is attributed to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

/// Options accepted when reporting an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorProps {
    /// Values substituted into the message template.
    pub message_args: Vec<String>,
    /// Values substituted into the recommendation template.
    pub recommendation_args: Vec<String>,
    /// Node the finding is attributed to.
    pub node_id: Option<String>,
    /// Overrides the result's default flow id.
    pub flow_id: Option<String>,
}

impl ErrorProps {
    /// Creates empty props.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message arguments.
    #[must_use]
    pub fn message_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.message_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the recommendation arguments.
    #[must_use]
    pub fn recommendation_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recommendation_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Attributes the finding to a node.
    #[must_use]
    pub fn node_id(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    /// Attributes the finding to a flow other than the default.
    #[must_use]
    pub fn flow_id(mut self, flow_id: impl Into<String>) -> Self {
        self.flow_id = Some(flow_id.into());
        self
    }
}

/// Accumulates the findings of one rule for one evaluation pass.
///
/// `pass` starts true and flips to false on the first error; it never
/// reverts. Entries keep insertion order. Whether a code exists is decided
/// by the caller (see [`crate::LintRule::add_error`]).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticResult {
    rule_id: String,
    rule_description: String,
    pass: bool,
    error_count: usize,
    entries: Vec<DiagnosticEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flow_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    excluded_codes: Vec<String>,
    clean: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    clean_messages: Vec<String>,
    #[serde(skip)]
    template: Template,
}

impl DiagnosticResult {
    /// Creates an empty, passing result.
    #[must_use]
    pub fn new(rule_id: impl Into<String>, rule_description: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            rule_description: rule_description.into(),
            pass: true,
            error_count: 0,
            entries: Vec::new(),
            flow_id: None,
            excluded_codes: Vec::new(),
            clean: false,
            clean_messages: Vec::new(),
            template: Template::default(),
        }
    }

    /// Uses `template` to render messages and recommendations.
    #[must_use]
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    /// Sets the flow id used when a report does not name one.
    pub fn set_flow_id(&mut self, flow_id: Option<String>) {
        self.flow_id = flow_id;
    }

    /// Records a finding.
    ///
    /// With a code, message and recommendation are rendered from its
    /// templates. Without one, an internal-error entry is synthesized from the
    /// first message argument; this is how a rule reports its own failure.
    pub fn add_error(&mut self, code: Option<&CodeDefinition>, props: ErrorProps) {
        let entry = match code {
            Some(code) => DiagnosticEntry {
                code_id: code.code_id.clone(),
                message: self.template.render(&code.message, &props.message_args),
                kind: code.kind_or_unknown().to_string(),
                recommendation: self
                    .template
                    .render(&code.recommendation, &props.recommendation_args),
                flow_id: props.flow_id.or_else(|| self.flow_id.clone()),
                node_id: props.node_id,
            },
            None => {
                let message_template = format!(
                    "Unknown Error [ruleId:{}]: {}",
                    self.rule_id,
                    self.template.token()
                );
                let first_arg = &props.message_args[..props.message_args.len().min(1)];
                debug!(rule = %self.rule_id, "recording internal error");
                DiagnosticEntry {
                    code_id: format!("ruleId-{}", self.rule_id),
                    message: self.template.render(&message_template, first_arg),
                    kind: kinds::INTERNAL_ERROR.to_string(),
                    recommendation: FALLBACK_RECOMMENDATION.to_string(),
                    flow_id: self.flow_id.clone(),
                    node_id: None,
                }
            }
        };

        self.push_error(entry);
    }

    /// Records that the rule referenced a code it never registered.
    pub fn add_unknown_code_error(&mut self, code_id: &str) {
        debug!(rule = %self.rule_id, code = code_id, "unknown code referenced");
        let entry = DiagnosticEntry {
            code_id: format!("ruleId-{}-unknown-code", self.rule_id),
            message: format!("Unknown Error Code [ruleId:{}]: {code_id}", self.rule_id),
            kind: kinds::INTERNAL_ERROR.to_string(),
            recommendation: UNKNOWN_CODE_RECOMMENDATION.to_string(),
            flow_id: self.flow_id.clone(),
            node_id: None,
        };
        self.push_error(entry);
    }

    /// Records that a finding for `code_id` was suppressed by configuration.
    ///
    /// Does not affect `pass` or the error count.
    pub fn add_excluded_code(&mut self, code_id: &str) {
        self.excluded_codes.push(code_id.to_string());
    }

    /// Adds a clean confirmation message.
    pub fn add_clean(&mut self, message: impl Into<String>) {
        self.clean = true;
        self.clean_messages.push(message.into());
    }

    /// Sets the clean flag.
    pub fn set_clean(&mut self, clean: bool) {
        self.clean = clean;
    }

    fn push_error(&mut self, entry: DiagnosticEntry) {
        self.entries.push(entry);
        self.error_count += 1;
        self.pass = false;
    }

    /// Id of the rule that produced this result.
    #[must_use]
    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    /// Description of the rule that produced this result.
    #[must_use]
    pub fn rule_description(&self) -> &str {
        &self.rule_description
    }

    /// True while no error has been recorded.
    #[must_use]
    pub fn pass(&self) -> bool {
        self.pass
    }

    /// Number of recorded errors.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Recorded findings in evaluation order.
    #[must_use]
    pub fn entries(&self) -> &[DiagnosticEntry] {
        &self.entries
    }

    /// Default flow id.
    #[must_use]
    pub fn flow_id(&self) -> Option<&str> {
        self.flow_id.as_deref()
    }

    /// Code ids suppressed by exclusion, in report order.
    #[must_use]
    pub fn excluded_codes(&self) -> &[String] {
        &self.excluded_codes
    }

    /// True once a clean confirmation was reported or the flag was set.
    #[must_use]
    pub fn clean(&self) -> bool {
        self.clean
    }

    /// Clean confirmation messages.
    #[must_use]
    pub fn clean_messages(&self) -> &[String] {
        &self.clean_messages
    }
}
