//! Normalization of expression sub-documents.
//!
//! A holder can carry its expression in four surface forms:
//!
//! ```text
//! { "expression": { "simple": { "expression": "${body}" } } }   canonical
//! { "expression": { "simple": "${body}" } }
//! { "simple": { "expression": "${body}" } }
//! { "simple": "${body}" }
//! ```
//!
//! [`parse`] reads any of them into an [`ExpressionModel`]; [`serialize`]
//! always writes the canonical form.

use crate::catalog::LanguageRegistry;
use crate::path::Outcome;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The property that wraps the language key in the canonical form.
pub const EXPRESSION_WRAPPER: &str = "expression";

/// A language-tagged expression in canonical form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpressionModel {
    /// Registry id of the language, e.g. `simple`.
    pub language: Option<String>,
    /// The language payload, always an object such as `{ "expression": "..." }`.
    pub model: Option<Value>,
}

impl ExpressionModel {
    pub fn new(language: &str, model: Value) -> Self {
        Self {
            language: Some(language.to_string()),
            model: Some(normalize_payload(model)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.language.is_none()
    }

    /// The expression text, when the payload carries one.
    pub fn expression_text(&self) -> Option<&str> {
        self.model.as_ref()?.get(EXPRESSION_WRAPPER)?.as_str()
    }
}

/// Reads the expression held by `holder`.
///
/// A registered language inside the `expression` wrapper wins over bare
/// language keys. When several languages are present the registry's
/// declaration order decides.
pub fn parse(holder: &Value, registry: &LanguageRegistry) -> ExpressionModel {
    let Some(map) = holder.as_object() else {
        return ExpressionModel::default();
    };

    if let Some(Value::Object(wrapper)) = map.get(EXPRESSION_WRAPPER) {
        // Only registered languages count; `serialize` drops anything else.
        if let Some(key) = first_registered_key(wrapper, registry) {
            if wrapper.len() > 1 {
                tracing::warn!(
                    chosen = %key,
                    candidates = wrapper.len(),
                    "expression wrapper carries more than one language"
                );
            }
            return model_for(key, &wrapper[key.as_str()], registry);
        }
    }

    match first_registered_key(map, registry) {
        Some(key) => {
            let matches = registry
                .iter()
                .filter(|l| map.contains_key(&l.model_name))
                .count();
            if matches > 1 {
                tracing::warn!(chosen = %key, matches, "holder carries more than one language");
            }
            model_for(key, &map[key.as_str()], registry)
        }
        None => ExpressionModel::default(),
    }
}

/// Writes `model` into `holder` in canonical form.
///
/// Every known language key is removed from the holder first. An empty or
/// unknown `language` removes the `expression` wrapper instead.
pub fn serialize(
    holder: &mut Value,
    language: Option<&str>,
    model: Value,
    registry: &LanguageRegistry,
) -> Outcome {
    if holder.is_null() {
        *holder = Value::Object(Map::new());
    }
    let Value::Object(map) = holder else {
        tracing::debug!("skipping expression write: holder is not an object");
        return Outcome::Skipped;
    };

    for language in registry.iter() {
        map.shift_remove(&language.model_name);
    }

    match language
        .filter(|id| !id.is_empty())
        .and_then(|id| registry.get(id))
    {
        Some(language) => {
            let mut wrapper = Map::new();
            wrapper.insert(language.model_name.clone(), normalize_payload(model));
            map.insert(EXPRESSION_WRAPPER.to_string(), Value::Object(wrapper));
        }
        None => {
            map.shift_remove(EXPRESSION_WRAPPER);
        }
    }
    Outcome::Applied
}

fn first_registered_key<'a>(
    map: &'a Map<String, Value>,
    registry: &LanguageRegistry,
) -> Option<&'a String> {
    registry
        .iter()
        .find_map(|language| map.keys().find(|key| **key == language.model_name))
}

fn model_for(key: &str, payload: &Value, registry: &LanguageRegistry) -> ExpressionModel {
    let language = registry
        .by_model_name(key)
        .map(|l| l.id.clone())
        .unwrap_or_else(|| key.to_string());
    ExpressionModel {
        language: Some(language),
        model: Some(normalize_payload(payload.clone())),
    }
}

/// Scalars become `{ "expression": scalar }`; objects are kept as they are.
fn normalize_payload(payload: Value) -> Value {
    match payload {
        Value::Object(_) => payload,
        Value::Null => Value::Object(Map::new()),
        scalar => {
            let mut model = Map::new();
            model.insert(EXPRESSION_WRAPPER.to_string(), scalar);
            Value::Object(model)
        }
    }
}
