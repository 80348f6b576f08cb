//! Common test utilities for building flow documents and editors.
use flowpath::prelude::*;
use serde_json::{Value, json};
use std::sync::Arc;

/// Parses a path, panicking on malformed test input.
#[allow(dead_code)]
pub fn path(raw: &str) -> Path {
    raw.parse().expect("test path should parse")
}

/// A route with a leaf, a choice and a component step.
///
/// ```text
/// from timer:tick
///   setBody
///   choice
///     when ${header.a}   -> log a
///     when ${header.b}   -> to direct:b
///     otherwise          -> log other
///   to kafka:orders
/// ```
#[allow(dead_code)]
pub fn sample_route() -> Value {
    json!({
        "route": {
            "id": "route-1234",
            "from": {
                "uri": "timer:tick",
                "steps": [
                    { "setBody": { "simple": "${date:now}" } },
                    { "choice": {
                        "when": [
                            {
                                "simple": "${header.a}",
                                "steps": [ { "log": { "message": "a" } } ]
                            },
                            {
                                "simple": "${header.b}",
                                "steps": [ { "to": { "uri": "direct:b" } } ]
                            }
                        ],
                        "otherwise": {
                            "steps": [ { "log": { "message": "other" } } ]
                        }
                    } },
                    { "to": { "uri": "kafka:orders", "description": "Publish order" } }
                ]
            }
        }
    })
}

/// A route whose `from` holds two log steps, `A` and `B`.
#[allow(dead_code)]
pub fn two_step_route() -> Value {
    json!({
        "route": {
            "id": "route-0001",
            "from": {
                "uri": "direct:start",
                "steps": [
                    { "log": { "message": "A" } },
                    { "log": { "message": "B" } }
                ]
            }
        }
    })
}

/// A route whose `from` holds three log steps, `A`, `B` and `C`.
#[allow(dead_code)]
pub fn three_step_route() -> Value {
    json!({
        "route": {
            "from": {
                "uri": "direct:start",
                "steps": [
                    { "log": { "message": "A" } },
                    { "log": { "message": "B" } },
                    { "log": { "message": "C" } }
                ]
            }
        }
    })
}

#[allow(dead_code)]
pub fn document(value: Value) -> FlowDocument {
    FlowDocument::from_value(value).expect("fixture should be a valid flow document")
}

#[allow(dead_code)]
pub fn editor(value: Value) -> FlowEditor {
    FlowEditor::new(Arc::new(EditorContext::default()), document(value))
}

/// The log messages of the steps array at `steps_path`, in order.
#[allow(dead_code)]
pub fn log_messages(value: &Value, steps_path: &str) -> Vec<String> {
    flowpath::path::resolve(value, &path(steps_path))
        .and_then(Value::as_array)
        .expect("steps array should resolve")
        .iter()
        .map(|step| {
            step.pointer("/log/message")
                .and_then(Value::as_str)
                .unwrap_or("<not a log>")
                .to_string()
        })
        .collect()
}

/// The processor names of the step holders at `steps_path`, in order.
#[allow(dead_code)]
pub fn step_names(value: &Value, steps_path: &str) -> Vec<String> {
    flowpath::path::resolve(value, &path(steps_path))
        .and_then(Value::as_array)
        .expect("steps array should resolve")
        .iter()
        .filter_map(|step| step.as_object()?.keys().next().cloned())
        .collect()
}
