//! Tests for path parsing, classification and resolution.
mod common;
use common::*;
use flowpath::path::{self as paths, Outcome};
use flowpath::prelude::*;
use serde_json::json;

#[test]
fn test_parse_splits_names_and_indices() {
    let p = path("route.from.steps.1.choice.when.0");

    assert_eq!(p.len(), 7);
    assert_eq!(p.segments()[0], Segment::Name("route".to_string()));
    assert_eq!(p.segments()[3], Segment::Index(1));
    assert_eq!(p.segments()[6], Segment::Index(0));
    assert_eq!(p.to_string(), "route.from.steps.1.choice.when.0");
}

#[test]
fn test_parse_rejects_empty_input_and_segments() {
    assert_eq!(Path::parse(""), Err(PathError::Empty));
    assert_eq!(
        Path::parse("route..from"),
        Err(PathError::EmptySegment { position: 1 })
    );
    assert_eq!(
        Path::parse("route.from."),
        Err(PathError::EmptySegment { position: 2 })
    );
}

#[test]
fn test_parse_rejects_leading_zero_indices() {
    assert_eq!(
        Path::parse("route.from.steps.007"),
        Err(PathError::LeadingZero {
            position: 3,
            token: "007".to_string(),
        })
    );
    assert!("route.from.steps.00".parse::<Path>().is_err());

    // A lone zero is the first index.
    let p = path("route.from.steps.0");
    assert_eq!(p.last(), &Segment::Index(0));
    assert_eq!(Path::parse(&p.to_string()), Ok(p));
}

#[test]
fn test_tail_classification() {
    assert_eq!(path("route").tail(), Tail::Root);
    assert_eq!(
        path("route.from.steps.2").tail(),
        Tail::ArrayElement { index: 2 }
    );
    assert_eq!(
        path("route.from.steps.0.log").tail(),
        Tail::IndexedProperty { index: 0 }
    );
    assert_eq!(
        path("route.from.steps.1.choice.otherwise").tail(),
        Tail::ObjectProperty
    );
    // Nested arrays still address an element.
    assert_eq!(path("matrix.rows.0.3").tail(), Tail::ArrayElement { index: 3 });
}

#[test]
fn test_owning_array_for_both_array_tails() {
    assert_eq!(
        path("route.from.steps.1").owning_array(),
        Some((path("route.from.steps"), 1))
    );
    assert_eq!(
        path("route.from.steps.1.choice").owning_array(),
        Some((path("route.from.steps"), 1))
    );
    assert_eq!(path("route.from").owning_array(), None);
    assert_eq!(path("route").owning_array(), None);
}

#[test]
fn test_path_helpers() {
    let p = path("route.from.steps.1.choice.when.0");

    assert_eq!(p.last_name(), Some("when"));
    assert_eq!(p.parent(), Some(path("route.from.steps.1.choice.when")));
    assert_eq!(path("route").parent(), None);
    assert_eq!(path("route.from").child("steps").at(0), path("route.from.steps.0"));
    assert_eq!(path("route.from").join(3usize), path("route.from.3"));
    assert!(p.starts_with(&path("route.from.steps.1")));
    assert!(!p.starts_with(&path("route.from.steps.2")));
    assert!(path("route").is_root());
    assert_eq!(p.root_segment(), &Segment::Name("route".to_string()));
}

#[test]
fn test_resolve_walks_objects_and_arrays() {
    let doc = sample_route();

    assert_eq!(
        paths::resolve(&doc, &path("route.from.steps.1.choice.when.1.steps.0.to.uri")),
        Some(&json!("direct:b"))
    );
    assert_eq!(
        paths::resolve(&doc, &path("route.from.uri")),
        Some(&json!("timer:tick"))
    );
}

#[test]
fn test_resolve_returns_none_on_shape_mismatch() {
    let doc = sample_route();

    // Missing key, index out of range, index into object, name into array.
    assert_eq!(paths::resolve(&doc, &path("route.to")), None);
    assert_eq!(paths::resolve(&doc, &path("route.from.steps.9")), None);
    assert_eq!(paths::resolve(&doc, &path("route.from.0")), None);
    assert_eq!(paths::resolve(&doc, &path("route.from.steps.log")), None);
    // Through a scalar.
    assert_eq!(paths::resolve(&doc, &path("route.from.uri.scheme")), None);
}

#[test]
fn test_set_then_resolve_round_trip() {
    let mut doc = sample_route();
    let target = path("route.from.steps.0.setBody.simple");

    assert_eq!(paths::set(&mut doc, &target, json!("${body}")), Outcome::Applied);
    assert_eq!(paths::resolve(&doc, &target), Some(&json!("${body}")));
}

#[test]
fn test_set_creates_missing_containers() {
    let mut doc = json!({ "route": {} });
    let target = path("route.from.steps.0.log.message");

    assert_eq!(paths::set(&mut doc, &target, json!("hi")), Outcome::Applied);
    assert_eq!(doc, json!({
        "route": { "from": { "steps": [ { "log": { "message": "hi" } } ] } }
    }));
}

#[test]
fn test_set_appends_at_array_length() {
    let mut doc = two_step_route();

    let outcome = paths::set(
        &mut doc,
        &path("route.from.steps.2"),
        json!({ "log": { "message": "C" } }),
    );

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(log_messages(&doc, "route.from.steps"), ["A", "B", "C"]);
}

#[test]
fn test_set_refuses_holes_and_scalar_intermediates() {
    let mut doc = two_step_route();
    let before = doc.clone();

    assert_eq!(
        paths::set(&mut doc, &path("route.from.steps.5"), json!({})),
        Outcome::Skipped
    );
    assert_eq!(
        paths::set(&mut doc, &path("route.from.uri.scheme"), json!("x")),
        Outcome::Skipped
    );
    assert_eq!(doc, before);
}

#[test]
fn test_path_serde_uses_dotted_form() {
    let p: Path = serde_json::from_value(json!("route.from.steps.0")).expect("valid path");
    assert_eq!(p, path("route.from.steps.0"));
    assert_eq!(serde_json::to_value(&p).unwrap(), json!("route.from.steps.0"));

    assert!(serde_json::from_value::<Path>(json!("route..from")).is_err());
}
