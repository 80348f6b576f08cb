//! Tests for reading and writing expression sub-documents.
mod common;
use common::*;
use flowpath::expression::{self, ExpressionModel};
use flowpath::prelude::*;
use serde_json::{Value, json};

fn registry() -> LanguageRegistry {
    LanguageRegistry::with_default_languages()
}

fn canonical_simple() -> ExpressionModel {
    ExpressionModel::new("simple", json!({ "expression": "${body}" }))
}

#[test]
fn test_shorthand_parses_and_serializes_canonically() {
    let registry = registry();
    let mut holder = json!({ "simple": "${body}" });

    let model = expression::parse(&holder, &registry);
    assert_eq!(model.language.as_deref(), Some("simple"));
    assert_eq!(model.model, Some(json!({ "expression": "${body}" })));

    let outcome = expression::serialize(
        &mut holder,
        model.language.as_deref(),
        model.model.clone().unwrap_or(Value::Null),
        &registry,
    );
    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(
        holder,
        json!({ "expression": { "simple": { "expression": "${body}" } } })
    );
}

#[test]
fn test_all_four_dialects_agree() {
    let registry = registry();
    let dialects = [
        json!({ "expression": { "simple": { "expression": "${body}" } } }),
        json!({ "expression": { "simple": "${body}" } }),
        json!({ "simple": { "expression": "${body}" } }),
        json!({ "simple": "${body}" }),
    ];

    for holder in &dialects {
        assert_eq!(expression::parse(holder, &registry), canonical_simple(), "{holder}");
    }
}

#[test]
fn test_parse_serialize_parse_is_idempotent() {
    let registry = registry();
    let holders = [
        json!({ "simple": "${body}" }),
        json!({ "jsonpath": { "expression": "$.id", "resultType": "java.lang.String" } }),
        json!({ "expression": { "constant": 42 } }),
        json!({ "header": "X-Trace", "id": "set-1" }),
        json!({ "id": "nothing-here" }),
    ];

    for original in holders {
        let parsed = expression::parse(&original, &registry);
        let mut holder = original.clone();
        let _ = expression::serialize(
            &mut holder,
            parsed.language.as_deref(),
            parsed.model.clone().unwrap_or(Value::Null),
            &registry,
        );
        assert_eq!(expression::parse(&holder, &registry), parsed, "{original}");
    }
}

#[test]
fn test_options_and_other_keys_survive_serialization() {
    let registry = registry();
    let mut holder = json!({
        "id": "split-1",
        "jsonpath": { "expression": "$.items", "suppressExceptions": true }
    });

    let model = expression::parse(&holder, &registry);
    let _ = expression::serialize(
        &mut holder,
        model.language.as_deref(),
        model.model.unwrap_or(Value::Null),
        &registry,
    );

    assert_eq!(
        holder,
        json!({
            "id": "split-1",
            "expression": { "jsonpath": { "expression": "$.items", "suppressExceptions": true } }
        })
    );
}

#[test]
fn test_ambiguous_holder_resolves_in_registry_order() {
    let registry = registry();

    let bare = json!({ "constant": "b", "simple": "a" });
    assert_eq!(
        expression::parse(&bare, &registry).language.as_deref(),
        Some("simple")
    );

    let wrapped = json!({ "expression": { "constant": "b", "simple": "a" } });
    assert_eq!(
        expression::parse(&wrapped, &registry).language.as_deref(),
        Some("simple")
    );
}

#[test]
fn test_wrapper_wins_over_bare_keys() {
    let holder = json!({ "simple": "bare", "expression": { "constant": "wrapped" } });

    let model = expression::parse(&holder, &registry());

    assert_eq!(model.language.as_deref(), Some("constant"));
    assert_eq!(model.expression_text(), Some("wrapped"));
}

#[test]
fn test_no_language_parses_to_empty_model() {
    let registry = registry();

    assert!(expression::parse(&json!({ "id": "x" }), &registry).is_empty());
    assert!(expression::parse(&json!("just a string"), &registry).is_empty());
    assert!(expression::parse(&json!({ "expression": {} }), &registry).is_empty());
}

#[test]
fn test_unregistered_wrapper_key_is_not_a_language() {
    let registry = registry();
    let mut holder = json!({ "expression": { "mvel": "${body}" } });

    let first = expression::parse(&holder, &registry);
    assert!(first.is_empty());

    let _ = expression::serialize(
        &mut holder,
        first.language.as_deref(),
        first.model.clone().unwrap_or(Value::Null),
        &registry,
    );
    assert_eq!(expression::parse(&holder, &registry), first);

    // A registered bare key is still found next to the unknown wrapper.
    let mixed = json!({ "expression": { "mvel": "x" }, "simple": "${body}" });
    assert_eq!(expression::parse(&mixed, &registry), canonical_simple());
}

#[test]
fn test_serialize_without_language_clears_the_expression() {
    let registry = registry();
    let mut holder = json!({
        "id": "filter-1",
        "simple": "${body}",
        "expression": { "constant": "x" }
    });

    let outcome = expression::serialize(&mut holder, None, Value::Null, &registry);
    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(holder, json!({ "id": "filter-1" }));

    let mut unknown = json!({ "simple": "${body}" });
    let _ = expression::serialize(&mut unknown, Some("cobol"), json!("x"), &registry);
    assert_eq!(unknown, json!({}));
}

#[test]
fn test_serialize_into_non_object_is_skipped() {
    let mut holder = json!(["not", "an", "object"]);

    let outcome = expression::serialize(&mut holder, Some("simple"), json!("${body}"), &registry());

    assert_eq!(outcome, Outcome::Skipped);
    assert_eq!(holder, json!(["not", "an", "object"]));
}

#[test]
fn test_registry_from_json_keeps_declaration_order() {
    let registry = LanguageRegistry::from_json(
        r#"[
            { "id": "mvel", "modelName": "mvel", "title": "MVEL" },
            { "id": "simple", "modelName": "simple", "title": "Simple" }
        ]"#,
    )
    .expect("valid language file");

    assert_eq!(registry.len(), 2);
    let holder = json!({ "simple": "a", "mvel": "b" });
    assert_eq!(
        expression::parse(&holder, &registry).language.as_deref(),
        Some("mvel")
    );

    assert!(LanguageRegistry::from_json(r#"[{ "id": "", "modelName": "x", "title": "X" }]"#).is_err());
}

#[test]
fn test_model_name_maps_back_to_language_id() {
    let mut registry = registry();
    registry.register(flowpath::catalog::Language {
        id: "js".to_string(),
        model_name: "javaScript".to_string(),
        title: "JavaScript".to_string(),
        description: None,
    });
    let mut holder = json!({ "javaScript": "body.length" });

    let model = expression::parse(&holder, &registry);
    assert_eq!(model.language.as_deref(), Some("js"));

    let _ = expression::serialize(&mut holder, Some("js"), json!("body.length"), &registry);
    assert_eq!(
        holder,
        json!({ "expression": { "javaScript": { "expression": "body.length" } } })
    );
}

#[test]
fn test_editor_reads_and_writes_expressions_by_path() {
    let mut editor = editor(sample_route());
    let when = path("route.from.steps.1.choice.when.0");

    let model = editor.parse_expression(&when);
    assert_eq!(model.expression_text(), Some("${header.a}"));

    let outcome = editor.serialize_expression(&when, Some("jq"), json!(".a == 1"));
    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(
        editor.resolve(&when.child("expression")),
        Some(&json!({ "jq": { "expression": ".a == 1" } }))
    );
    assert!(editor.resolve(&when.child("simple")).is_none());
    assert!(editor.resolve(&when.child("steps")).is_some());
}

#[test]
fn test_editor_creates_missing_holder() {
    let mut editor = editor(two_step_route());
    let holder = path("route.from.steps.0.log.filterExpression");

    let outcome = editor.serialize_expression(&holder, Some("simple"), json!("${body} != null"));

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(
        editor.parse_expression(&holder).expression_text(),
        Some("${body} != null")
    );
    assert_eq!(
        editor.serialize_expression(&path("route.from.steps.9.log.x"), Some("simple"), json!("a")),
        Outcome::Skipped
    );
}
