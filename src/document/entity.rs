use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of flow a document describes, named by its root segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Route,
    RouteConfiguration,
    ErrorHandler,
    RestConfiguration,
    Rest,
    Intercept,
    InterceptFrom,
    InterceptSendToEndpoint,
    OnException,
    OnCompletion,
    /// A root segment the editor has no dedicated support for.
    Unknown,
}

impl EntityKind {
    pub fn from_root_segment(segment: &str) -> Self {
        match segment {
            "route" => EntityKind::Route,
            "routeConfiguration" => EntityKind::RouteConfiguration,
            "errorHandler" => EntityKind::ErrorHandler,
            "restConfiguration" => EntityKind::RestConfiguration,
            "rest" => EntityKind::Rest,
            "intercept" => EntityKind::Intercept,
            "interceptFrom" => EntityKind::InterceptFrom,
            "interceptSendToEndpoint" => EntityKind::InterceptSendToEndpoint,
            "onException" => EntityKind::OnException,
            "onCompletion" => EntityKind::OnCompletion,
            _ => EntityKind::Unknown,
        }
    }

    /// The root segment this kind is stored under, if it has a fixed one.
    pub fn root_segment(self) -> Option<&'static str> {
        Some(match self {
            EntityKind::Route => "route",
            EntityKind::RouteConfiguration => "routeConfiguration",
            EntityKind::ErrorHandler => "errorHandler",
            EntityKind::RestConfiguration => "restConfiguration",
            EntityKind::Rest => "rest",
            EntityKind::Intercept => "intercept",
            EntityKind::InterceptFrom => "interceptFrom",
            EntityKind::InterceptSendToEndpoint => "interceptSendToEndpoint",
            EntityKind::OnException => "onException",
            EntityKind::OnCompletion => "onCompletion",
            EntityKind::Unknown => return None,
        })
    }

    /// Singleton, flow-scoped constructs that are not ordinary steps.
    pub fn is_special(self) -> bool {
        !matches!(self, EntityKind::Route | EntityKind::Unknown)
    }

    /// Kinds whose root owns a `steps` branch directly.
    pub fn has_root_steps(self) -> bool {
        matches!(
            self,
            EntityKind::Intercept
                | EntityKind::InterceptFrom
                | EntityKind::InterceptSendToEndpoint
                | EntityKind::OnException
                | EntityKind::OnCompletion
        )
    }

    /// Prefix used for generated entity ids.
    pub fn id_prefix(self) -> &'static str {
        self.root_segment().unwrap_or("entity")
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_segment().unwrap_or("unknown"))
    }
}
