//! Flow handles and the flow context a rule evaluates.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A flow document under evaluation.
///
/// The framework only reads the top-level `flowId`; rules inspect the rest
/// through [`Flow::document`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flow(serde_json::Value);

impl Flow {
    /// Wraps a parsed flow document.
    #[must_use]
    pub fn new(document: serde_json::Value) -> Self {
        Self(document)
    }

    /// Returns the flow's `flowId`, if it has a string one.
    #[must_use]
    pub fn flow_id(&self) -> Option<&str> {
        self.0.get("flowId").and_then(serde_json::Value::as_str)
    }

    /// Returns the raw document.
    #[must_use]
    pub fn document(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for Flow {
    fn from(document: serde_json::Value) -> Self {
        Self::new(document)
    }
}

/// The flows bound to a rule for one evaluation.
///
/// `all_flows` always contains `main_flow`. Flows are shared, never copied.
#[derive(Debug, Clone)]
pub struct FlowContext {
    /// The flow being linted.
    pub main_flow: Arc<Flow>,
    /// Every flow in the run, for cross-flow checks.
    pub all_flows: Vec<Arc<Flow>>,
}

impl FlowContext {
    /// Creates a context, prepending `main_flow` to `all_flows` if absent.
    #[must_use]
    pub fn new(main_flow: Arc<Flow>, mut all_flows: Vec<Arc<Flow>>) -> Self {
        if !all_flows.iter().any(|f| Arc::ptr_eq(f, &main_flow)) {
            all_flows.insert(0, Arc::clone(&main_flow));
        }
        Self {
            main_flow,
            all_flows,
        }
    }

    /// Creates a context for a single flow.
    #[must_use]
    pub fn single(flow: Arc<Flow>) -> Self {
        Self::new(flow, Vec::new())
    }

    /// Flows other than the main one.
    pub fn other_flows(&self) -> impl Iterator<Item = &Arc<Flow>> {
        self.all_flows
            .iter()
            .filter(move |f| !Arc::ptr_eq(f, &self.main_flow))
    }
}
