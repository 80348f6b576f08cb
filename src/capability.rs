//! Which structural edits the editor offers for a node.

use crate::catalog::{Catalog, StepsPropertyType};
use crate::document::EntityKind;
use serde::{Deserialize, Serialize};

/// Processors that are anchored in place and take no siblings.
const SIBLING_DISABLED: &[&str] = &[
    "route",
    "from",
    "when",
    "otherwise",
    "doCatch",
    "doFinally",
    "onFallback",
    "intercept",
    "interceptFrom",
    "interceptSendToEndpoint",
    "onException",
    "onCompletion",
];

const REPLACE_DISABLED: &[&str] = &[
    "route",
    "when",
    "otherwise",
    "doCatch",
    "doFinally",
    "onFallback",
];

const REMOVE_DISABLED: &[&str] = &["route", "from"];

const DISABLE_DISABLED: &[&str] = &[
    "route",
    "from",
    "when",
    "otherwise",
    "doCatch",
    "doFinally",
    "onFallback",
];

/// Whether a path denotes the root of a flow or a node inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathRole {
    Root,
    Interior,
}

/// The set of structural edits allowed on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInteraction {
    pub can_have_previous_step: bool,
    pub can_have_next_step: bool,
    pub can_have_children: bool,
    pub can_have_special_children: bool,
    pub can_replace_step: bool,
    pub can_remove_step: bool,
    pub can_remove_flow: bool,
    pub can_be_disabled: bool,
}

impl NodeInteraction {
    /// Nothing but removing the whole flow.
    pub const fn flow_only() -> Self {
        Self {
            can_have_previous_step: false,
            can_have_next_step: false,
            can_have_children: false,
            can_have_special_children: false,
            can_replace_step: false,
            can_remove_step: false,
            can_remove_flow: true,
            can_be_disabled: false,
        }
    }
}

/// Resolves the capabilities of a processor from its steps properties and the
/// fixed allow/deny lists. Unknown processors are treated as permissive leaves.
pub fn capabilities_of(catalog: &Catalog, processor_name: &str, role: PathRole) -> NodeInteraction {
    let steps_properties = catalog.steps_properties(processor_name);
    let can_have_previous_step = !SIBLING_DISABLED.contains(&processor_name);

    NodeInteraction {
        can_have_previous_step,
        can_have_next_step: can_have_previous_step,
        can_have_children: steps_properties
            .iter()
            .any(|p| p.kind == StepsPropertyType::Branch),
        can_have_special_children: steps_properties.len() > 1,
        can_replace_step: !REPLACE_DISABLED.contains(&processor_name),
        can_remove_step: !REMOVE_DISABLED.contains(&processor_name),
        can_remove_flow: role == PathRole::Root,
        can_be_disabled: !DISABLE_DISABLED.contains(&processor_name),
    }
}

impl EntityKind {
    /// Fixed capabilities for the root node of singleton, flow-scoped entities.
    /// `None` means the generic resolver applies.
    pub fn interaction_override(self) -> Option<NodeInteraction> {
        match self {
            EntityKind::ErrorHandler | EntityKind::RestConfiguration | EntityKind::Rest => {
                Some(NodeInteraction::flow_only())
            }
            EntityKind::RouteConfiguration => Some(NodeInteraction {
                can_have_special_children: true,
                ..NodeInteraction::flow_only()
            }),
            EntityKind::Intercept
            | EntityKind::InterceptFrom
            | EntityKind::InterceptSendToEndpoint
            | EntityKind::OnException
            | EntityKind::OnCompletion => Some(NodeInteraction {
                can_have_children: true,
                ..NodeInteraction::flow_only()
            }),
            EntityKind::Route | EntityKind::Unknown => None,
        }
    }
}
