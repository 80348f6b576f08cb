//! Structural edits addressed by [`Path`].
//!
//! Every edit either completes or leaves the document untouched. A path that
//! does not resolve is an expected condition in an editor that re-renders
//! against a changing document, so it is reported as [`Outcome::Skipped`]
//! rather than as an error. Arrays never end up with holes.

use crate::catalog::{Catalog, StepsPropertyType};
use crate::error::MutationError;
use crate::path::{self, Outcome, Path, Segment, Tail};
use serde::Serialize;
use serde_json::{Map, Value};

/// Where `insert_child` places the new step inside an array property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildInsertMode {
    /// Unshift: the new step becomes the first child.
    InsertFirst,
    /// Push: the new step becomes the last child.
    Append,
}

/// Where `insert_adjacent` places the new step relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjacentMode {
    Before,
    After,
    Replace,
}

/// A detached copy of a step, ready to be pasted elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopiedStep {
    pub processor_name: String,
    pub definition: Value,
}

impl CopiedStep {
    /// The value to insert into a `branch` array: `{ <processor>: <definition> }`.
    pub fn to_step_holder(&self) -> Value {
        let mut holder = Map::new();
        holder.insert(self.processor_name.clone(), self.definition.clone());
        Value::Object(holder)
    }
}

/// Inserts `value` into the steps property `property` of `processor`, whose
/// definition lives at `path`.
///
/// [`FlowDocument::insert_child`](super::FlowDocument::insert_child) works out
/// the processor for step-holder and clause paths.
pub fn insert_child(
    document: &mut Value,
    catalog: &Catalog,
    path: &Path,
    processor: &str,
    property: &str,
    value: Value,
    mode: ChildInsertMode,
) -> Result<Outcome, MutationError> {
    let Some(target) = path::resolve_mut(document, path) else {
        tracing::debug!(%path, property, "skipping child insert: path does not resolve");
        return Ok(Outcome::Skipped);
    };
    let descriptor = catalog.steps_property(processor, property).ok_or_else(|| {
        MutationError::UnknownStepsProperty {
            processor: processor.to_string(),
            property: property.to_string(),
        }
    })?;

    if target.is_null() {
        *target = Value::Object(Map::new());
    }
    let Value::Object(map) = target else {
        tracing::debug!(%path, "skipping child insert: target is not an object");
        return Ok(Outcome::Skipped);
    };

    if descriptor.kind == StepsPropertyType::SingleClause {
        map.insert(property.to_string(), value);
        return Ok(Outcome::Applied);
    }

    let slot = map
        .entry(property.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if slot.is_null() {
        *slot = Value::Array(Vec::new());
    }
    let Value::Array(items) = slot else {
        return Err(MutationError::NotAnArray {
            path: path.child(property),
        });
    };
    match mode {
        ChildInsertMode::InsertFirst => items.insert(0, value),
        ChildInsertMode::Append => items.push(value),
    }
    Ok(Outcome::Applied)
}

/// Inserts `value` next to (or in place of) the array element `path` points at.
///
/// For `(name, index)` tails the owning array is `path` minus the index; for
/// `(index, name)` tails it is `path` minus the last two segments.
pub fn insert_adjacent(
    document: &mut Value,
    path: &Path,
    value: Value,
    mode: AdjacentMode,
) -> Result<Outcome, MutationError> {
    let (owner, index) = path
        .owning_array()
        .ok_or_else(|| MutationError::UnsupportedTail { path: path.clone() })?;
    let Some(Value::Array(items)) = path::resolve_mut(document, &owner) else {
        tracing::debug!(%path, "skipping adjacent insert: owning array does not resolve");
        return Ok(Outcome::Skipped);
    };
    if index >= items.len() {
        tracing::debug!(%path, len = items.len(), "skipping adjacent insert: index out of range");
        return Ok(Outcome::Skipped);
    }

    match mode {
        AdjacentMode::Before => items.insert(index, value),
        AdjacentMode::After => items.insert(index + 1, value),
        AdjacentMode::Replace => items[index] = value,
    }
    Ok(Outcome::Applied)
}

/// Replaces the node at `path`: a splice for array tails, an overwrite of an
/// existing key for object-property tails.
pub fn replace(document: &mut Value, path: &Path, value: Value) -> Result<Outcome, MutationError> {
    if path.owning_array().is_some() {
        return insert_adjacent(document, path, value, AdjacentMode::Replace);
    }
    match path::resolve_mut(document, path) {
        Some(slot) => {
            *slot = value;
            Ok(Outcome::Applied)
        }
        None => {
            tracing::debug!(%path, "skipping replace: path does not resolve");
            Ok(Outcome::Skipped)
        }
    }
}

/// Removes the node at `path`.
///
/// An array element is spliced out. For an `(index, name)` tail whose element
/// is a step holder (`{ "<name>": ... }` with no other keys), the whole element
/// is removed from its array. Any other named property is deleted from its
/// parent object.
pub fn remove(document: &mut Value, path: &Path) -> Result<Outcome, MutationError> {
    let outcome = match path.tail() {
        Tail::Root => return Err(MutationError::RootRemoval { path: path.clone() }),
        Tail::ArrayElement { index } => match resolve_ancestor_mut(document, path, 1) {
            Some(Value::Array(items)) if index < items.len() => {
                items.remove(index);
                Outcome::Applied
            }
            _ => Outcome::Skipped,
        },
        Tail::IndexedProperty { index } => {
            let name = path.last().as_name().unwrap_or_default();
            match resolve_ancestor_mut(document, path, 2) {
                Some(Value::Array(items)) => remove_indexed_property(items, index, name),
                _ => Outcome::Skipped,
            }
        }
        Tail::ObjectProperty => {
            let name = path.last().as_name().unwrap_or_default();
            match resolve_ancestor_mut(document, path, 1) {
                Some(Value::Object(map)) => remove_key(map, name),
                _ => Outcome::Skipped,
            }
        }
    };

    if outcome == Outcome::Skipped {
        tracing::debug!(%path, "skipping removal: path does not resolve");
    }
    Ok(outcome)
}

/// Moves the step at `from` next to (or in place of) the step at `to`.
///
/// Both endpoints are validated before the document is touched, so a move
/// either applies fully or not at all.
pub fn move_step(
    document: &mut Value,
    from: &Path,
    to: &Path,
    mode: AdjacentMode,
) -> Result<Outcome, MutationError> {
    let (from_owner, from_index) = from
        .owning_array()
        .ok_or_else(|| MutationError::UnsupportedTail { path: from.clone() })?;
    let (to_owner, to_index) = to
        .owning_array()
        .ok_or_else(|| MutationError::UnsupportedTail { path: to.clone() })?;

    let from_element = from_owner.at(from_index);
    let to_element = to_owner.at(to_index);
    if to_element == from_element {
        tracing::debug!(%from, %to, "skipping move: source and target are the same step");
        return Ok(Outcome::Skipped);
    }
    if to_element.starts_with(&from_element) {
        return Err(MutationError::MoveIntoSelf {
            from: from.clone(),
            to: to.clone(),
        });
    }

    let Some(moved) = path::resolve(document, &from_element).cloned() else {
        tracing::debug!(%from, "skipping move: source does not resolve");
        return Ok(Outcome::Skipped);
    };
    let target_exists = matches!(
        path::resolve(document, &to_owner),
        Some(Value::Array(items)) if to_index < items.len()
    );
    if !target_exists {
        tracing::debug!(%to, "skipping move: target does not resolve");
        return Ok(Outcome::Skipped);
    }

    let target = retarget_after_removal(to, &from_owner, from_index);
    let removed = remove(document, &from_element)?;
    debug_assert!(removed.is_applied());
    insert_adjacent(document, &target, moved, mode)
}

/// Clones the step at `path` for copy and paste.
pub fn copy(document: &Value, path: &Path) -> Option<CopiedStep> {
    let definition = path::resolve(document, path)?.clone();
    let processor_name = path.last_name()?.to_string();
    Some(CopiedStep {
        processor_name,
        definition,
    })
}

fn resolve_ancestor_mut<'a>(
    document: &'a mut Value,
    path: &Path,
    levels: usize,
) -> Option<&'a mut Value> {
    let ancestor = path.ancestor(levels)?;
    path::resolve_mut(document, &ancestor)
}

fn is_step_holder(element: &Map<String, Value>, name: &str) -> bool {
    element.len() == 1 && element.contains_key(name)
}

fn remove_indexed_property(items: &mut Vec<Value>, index: usize, name: &str) -> Outcome {
    let holder = match items.get(index) {
        Some(Value::Object(element)) => is_step_holder(element, name),
        _ => return Outcome::Skipped,
    };
    if holder {
        items.remove(index);
        return Outcome::Applied;
    }
    match &mut items[index] {
        Value::Object(element) => remove_key(element, name),
        _ => Outcome::Skipped,
    }
}

fn remove_key(map: &mut Map<String, Value>, name: &str) -> Outcome {
    match map.shift_remove(name) {
        Some(_) => Outcome::Applied,
        None => Outcome::Skipped,
    }
}

/// Shifts `path` to account for the element at `owner.index` being spliced out.
fn retarget_after_removal(path: &Path, owner: &Path, index: usize) -> Path {
    if !path.starts_with(owner) || path.len() <= owner.len() {
        return path.clone();
    }
    let position = owner.len();
    match path.segments()[position] {
        Segment::Index(i) if i > index => path.with_index_at(position, i - 1),
        _ => path.clone(),
    }
}
