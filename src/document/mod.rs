//! The flow document: a plain JSON tree under a single root segment.

use crate::catalog::Catalog;
use crate::error::{DocumentError, MutationError};
use crate::path::{self, Outcome, Path, Segment};
use rand::Rng;
use serde_json::{Value, json};

mod entity;
pub mod mutation;

pub use entity::EntityKind;
pub use mutation::{AdjacentMode, ChildInsertMode, CopiedStep};

/// A flow document together with its root segment.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowDocument {
    value: Value,
    root: String,
    kind: EntityKind,
}

impl FlowDocument {
    /// Wraps a loaded document. The root must be an object with exactly one key.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        let map = value.as_object().ok_or(DocumentError::NotAnObject)?;
        let mut keys = map.keys();
        let root = keys.next().ok_or(DocumentError::MissingRootSegment)?.clone();
        if keys.next().is_some() {
            return Err(DocumentError::MultipleRootSegments(
                map.keys().cloned().collect(),
            ));
        }
        let kind = EntityKind::from_root_segment(&root);
        Ok(Self { value, root, kind })
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| DocumentError::JsonParseError(e.to_string()))?;
        Self::from_value(value)
    }

    /// A new route that starts from a timer and logs the message body.
    pub fn new_route(id: &str) -> Self {
        let value = json!({
            "route": {
                "id": id,
                "from": {
                    "uri": "timer:template",
                    "parameters": { "period": "1000" },
                    "steps": [
                        { "log": { "message": "${body}" } }
                    ]
                }
            }
        });
        Self {
            value,
            root: "route".to_string(),
            kind: EntityKind::Route,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn root_segment(&self) -> &str {
        &self.root
    }

    pub fn root_path(&self) -> Path {
        Path::root(&self.root)
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Direct mutable access for collaborators such as form editors.
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// The definition stored under the root segment.
    pub fn definition(&self) -> Option<&Value> {
        self.value.get(&self.root)
    }

    /// The entity id, read from the root definition.
    pub fn id(&self) -> Option<&str> {
        self.definition()?.get("id")?.as_str()
    }

    pub fn set_id(&mut self, id: &str) -> Outcome {
        let path = self.root_path().child("id");
        path::set(&mut self.value, &path, Value::String(id.to_string()))
    }

    /// Assigns a generated `<kind>-<nnnn>` id when the entity has none.
    ///
    /// Returns `None` when the id cannot be stored because the root
    /// definition is not an object.
    pub fn ensure_id<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        if let Some(id) = self.id() {
            return Some(id.to_string());
        }
        let id = format!("{}-{:04}", self.kind.id_prefix(), rng.random_range(0..10_000));
        self.set_id(&id).is_applied().then_some(id)
    }

    /// Human-readable label: description, then id, then the root segment.
    pub fn label(&self) -> String {
        let definition = self.definition();
        definition
            .and_then(|d| d.get("description"))
            .and_then(Value::as_str)
            .or_else(|| self.id())
            .unwrap_or(self.root.as_str())
            .to_string()
    }

    pub fn resolve(&self, path: &Path) -> Option<&Value> {
        path::resolve(&self.value, path)
    }

    pub fn set(&mut self, path: &Path, value: Value) -> Outcome {
        path::set(&mut self.value, path, value)
    }

    pub fn insert_child(
        &mut self,
        catalog: &Catalog,
        path: &Path,
        property: &str,
        value: Value,
        mode: ChildInsertMode,
    ) -> Result<Outcome, MutationError> {
        let Some((definition, processor)) = self.processor_at(path) else {
            tracing::debug!(%path, property, "skipping child insert: path does not resolve");
            return Ok(Outcome::Skipped);
        };
        mutation::insert_child(
            &mut self.value,
            catalog,
            &definition,
            &processor,
            property,
            value,
            mode,
        )
    }

    pub fn insert_adjacent(
        &mut self,
        path: &Path,
        value: Value,
        mode: AdjacentMode,
    ) -> Result<Outcome, MutationError> {
        mutation::insert_adjacent(&mut self.value, path, value, mode)
    }

    pub fn replace(&mut self, path: &Path, value: Value) -> Result<Outcome, MutationError> {
        mutation::replace(&mut self.value, path, value)
    }

    pub fn remove(&mut self, path: &Path) -> Result<Outcome, MutationError> {
        mutation::remove(&mut self.value, path)
    }

    pub fn move_step(
        &mut self,
        from: &Path,
        to: &Path,
        mode: AdjacentMode,
    ) -> Result<Outcome, MutationError> {
        mutation::move_step(&mut self.value, from, to, mode)
    }

    pub fn copy(&self, path: &Path) -> Option<CopiedStep> {
        mutation::copy(&self.value, path)
    }

    /// The processor stored at `path`, together with the path of its
    /// definition. A step holder (`steps.0`) yields the step it wraps and a
    /// clause array element (`when.0`) is named after its array.
    pub fn processor_at(&self, path: &Path) -> Option<(Path, String)> {
        let value = self.resolve(path)?;
        match path.last() {
            Segment::Name(name) => Some((path.clone(), name.clone())),
            Segment::Index(_) => {
                let array_name = path.parent()?.last_name()?.to_string();
                match value.as_object() {
                    Some(holder) if array_name == "steps" && holder.len() == 1 => {
                        let key = holder.keys().next()?.clone();
                        Some((path.child(&key), key))
                    }
                    _ => Some((path.clone(), array_name)),
                }
            }
        }
    }

    /// Whether `path` addresses this document's root segment.
    pub fn is_root_path(&self, path: &Path) -> bool {
        path.is_root() && matches!(path.root_segment(), Segment::Name(name) if *name == self.root)
    }
}
