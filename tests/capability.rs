//! Tests for capability resolution.
mod common;
use common::*;
use flowpath::capability::capabilities_of;
use flowpath::prelude::*;
use serde_json::json;

#[test]
fn test_leaf_step_is_fully_editable_except_children() {
    let interaction = capabilities_of(&Catalog::with_defaults(), "log", PathRole::Interior);

    assert_eq!(
        interaction,
        NodeInteraction {
            can_have_previous_step: true,
            can_have_next_step: true,
            can_have_children: false,
            can_have_special_children: false,
            can_replace_step: true,
            can_remove_step: true,
            can_remove_flow: false,
            can_be_disabled: true,
        }
    );
}

#[test]
fn test_choice_has_special_children_but_no_branch() {
    let interaction = capabilities_of(&Catalog::with_defaults(), "choice", PathRole::Interior);

    assert!(!interaction.can_have_children);
    assert!(interaction.can_have_special_children);
    assert!(interaction.can_have_previous_step);
    assert!(interaction.can_replace_step);
}

#[test]
fn test_do_try_has_children_and_special_children() {
    let interaction = capabilities_of(&Catalog::with_defaults(), "doTry", PathRole::Interior);

    assert!(interaction.can_have_children);
    assert!(interaction.can_have_special_children);
}

#[test]
fn test_clauses_are_anchored() {
    let catalog = Catalog::with_defaults();
    for clause in ["when", "otherwise", "doCatch", "doFinally", "onFallback"] {
        let interaction = capabilities_of(&catalog, clause, PathRole::Interior);
        assert!(interaction.can_have_children, "{clause} holds steps");
        assert!(!interaction.can_have_previous_step, "{clause} takes no siblings");
        assert!(!interaction.can_have_next_step, "{clause} takes no siblings");
        assert!(!interaction.can_replace_step, "{clause} cannot be replaced");
        assert!(!interaction.can_be_disabled, "{clause} cannot be disabled");
        assert!(interaction.can_remove_step, "{clause} can be removed");
    }
}

#[test]
fn test_from_cannot_be_removed_or_disabled() {
    let interaction = capabilities_of(&Catalog::with_defaults(), "from", PathRole::Interior);

    assert!(!interaction.can_remove_step);
    assert!(!interaction.can_be_disabled);
    assert!(!interaction.can_have_previous_step);
    assert!(interaction.can_replace_step);
    assert!(interaction.can_have_children);
}

#[test]
fn test_only_root_role_removes_the_flow() {
    let catalog = Catalog::with_defaults();

    assert!(capabilities_of(&catalog, "route", PathRole::Root).can_remove_flow);
    assert!(!capabilities_of(&catalog, "route", PathRole::Interior).can_remove_flow);
}

#[test]
fn test_unknown_processor_is_a_permissive_leaf() {
    let interaction =
        capabilities_of(&Catalog::with_defaults(), "somethingCustom", PathRole::Interior);

    assert!(!interaction.can_have_children);
    assert!(!interaction.can_have_special_children);
    assert!(interaction.can_have_previous_step);
    assert!(interaction.can_replace_step);
    assert!(interaction.can_remove_step);
    assert!(interaction.can_be_disabled);
}

#[test]
fn test_special_entities_override_the_resolver() {
    assert_eq!(
        EntityKind::ErrorHandler.interaction_override(),
        Some(NodeInteraction::flow_only())
    );
    assert_eq!(
        EntityKind::Rest.interaction_override(),
        Some(NodeInteraction::flow_only())
    );

    let configuration = EntityKind::RouteConfiguration
        .interaction_override()
        .expect("route configurations are special");
    assert!(configuration.can_have_special_children);
    assert!(!configuration.can_have_children);
    assert!(configuration.can_remove_flow);

    let intercept = EntityKind::InterceptFrom
        .interaction_override()
        .expect("interceptors are special");
    assert!(intercept.can_have_children);
    assert!(!intercept.can_have_next_step);

    assert_eq!(EntityKind::Route.interaction_override(), None);
}

#[test]
fn test_editor_interaction_uses_entity_override_at_root() {
    let editor = editor(json!({
        "onException": {
            "exception": ["java.lang.Exception"],
            "steps": [ { "log": { "message": "boom" } } ]
        }
    }));

    let root = editor.interaction(&path("onException")).unwrap();
    assert!(root.can_have_children);
    assert!(root.can_remove_flow);
    assert!(!root.can_replace_step);

    let step = editor.interaction(&path("onException.steps.0.log")).unwrap();
    assert!(step.can_replace_step);
    assert!(!step.can_remove_flow);
}

#[test]
fn test_editor_interaction_resolves_holders_and_clauses() {
    let editor = editor(sample_route());

    let holder = editor.interaction(&path("route.from.steps.1")).unwrap();
    assert!(holder.can_have_special_children, "the holder resolves to the choice");

    let when = editor
        .interaction(&path("route.from.steps.1.choice.when.0"))
        .unwrap();
    assert!(!when.can_have_previous_step);
    assert!(when.can_have_children);

    let route = editor.interaction(&path("route")).unwrap();
    assert!(route.can_remove_flow);
    assert!(!route.can_remove_step);

    assert_eq!(editor.interaction(&path("route.from.steps.9")), None);
}
