//! The editor-facing surface: an immutable [`EditorContext`] holding the
//! catalog, languages and mappers, and a [`FlowEditor`] that owns one
//! document and applies edits to it.

use crate::capability::{self, NodeInteraction, PathRole};
use crate::catalog::{Catalog, LanguageRegistry, ProcessorDefinition};
use crate::document::{AdjacentMode, ChildInsertMode, CopiedStep, FlowDocument};
use crate::error::{CatalogError, MutationError};
use crate::expression::{self, ExpressionModel};
use crate::graph::{GraphBuilder, MapperRegistry, NodeMapper, VisualGraph};
use crate::path::{Outcome, Path};
use serde_json::Value;
use std::sync::Arc;

/// Everything an editor needs besides the document. Immutable once built.
#[derive(Debug, Clone)]
pub struct EditorContext {
    catalog: Catalog,
    languages: LanguageRegistry,
    mappers: MapperRegistry,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl EditorContext {
    pub fn builder() -> EditorContextBuilder {
        EditorContextBuilder::new()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn languages(&self) -> &LanguageRegistry {
        &self.languages
    }

    pub fn mappers(&self) -> &MapperRegistry {
        &self.mappers
    }

    pub fn graph_builder(&self) -> GraphBuilder<'_> {
        GraphBuilder::new(&self.catalog, &self.mappers)
    }

    pub fn capabilities_of(&self, processor_name: &str, role: PathRole) -> NodeInteraction {
        capability::capabilities_of(&self.catalog, processor_name, role)
    }
}

pub struct EditorContextBuilder {
    catalog: Catalog,
    languages: LanguageRegistry,
    mappers: MapperRegistry,
}

impl Default for EditorContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorContextBuilder {
    /// Starts from the default catalog, languages and mappers.
    pub fn new() -> Self {
        Self {
            catalog: Catalog::with_defaults(),
            languages: LanguageRegistry::with_default_languages(),
            mappers: MapperRegistry::with_defaults(),
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Merges processors and components from a JSON catalog file.
    pub fn with_catalog_json(mut self, json: &str) -> Result<Self, CatalogError> {
        self.catalog.extend_from_json(json)?;
        Ok(self)
    }

    pub fn with_processor(mut self, processor: ProcessorDefinition) -> Self {
        self.catalog.insert_processor(processor);
        self
    }

    pub fn with_languages(mut self, languages: LanguageRegistry) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_mapper<M: NodeMapper + 'static>(mut self, mapper: M) -> Self {
        self.mappers.insert(Arc::new(mapper));
        self
    }

    /// Maps `user_name` with the mapper of `builtin_name`. Unknown builtins
    /// leave the registry untouched.
    pub fn with_mapper_alias(mut self, user_name: &str, builtin_name: &str) -> Self {
        if !self.mappers.alias(user_name, builtin_name) {
            tracing::debug!(user_name, builtin_name, "no mapper to alias");
        }
        self
    }

    pub fn build(self) -> EditorContext {
        EditorContext {
            catalog: self.catalog,
            languages: self.languages,
            mappers: self.mappers,
        }
    }
}

/// One document under edit.
#[derive(Debug, Clone)]
pub struct FlowEditor {
    context: Arc<EditorContext>,
    document: FlowDocument,
}

impl FlowEditor {
    pub fn new(context: Arc<EditorContext>, document: FlowDocument) -> Self {
        Self { context, document }
    }

    pub fn context(&self) -> &EditorContext {
        &self.context
    }

    pub fn document(&self) -> &FlowDocument {
        &self.document
    }

    pub fn into_document(self) -> FlowDocument {
        self.document
    }

    pub fn resolve(&self, path: &Path) -> Option<&Value> {
        self.document.resolve(path)
    }

    pub fn set(&mut self, path: &Path, value: Value) -> Outcome {
        self.document.set(path, value)
    }

    pub fn insert_child(
        &mut self,
        path: &Path,
        property: &str,
        value: Value,
        mode: ChildInsertMode,
    ) -> Result<Outcome, MutationError> {
        self.document
            .insert_child(&self.context.catalog, path, property, value, mode)
    }

    pub fn insert_adjacent(
        &mut self,
        path: &Path,
        value: Value,
        mode: AdjacentMode,
    ) -> Result<Outcome, MutationError> {
        self.document.insert_adjacent(path, value, mode)
    }

    pub fn replace(&mut self, path: &Path, value: Value) -> Result<Outcome, MutationError> {
        self.document.replace(path, value)
    }

    pub fn remove(&mut self, path: &Path) -> Result<Outcome, MutationError> {
        self.document.remove(path)
    }

    pub fn move_step(
        &mut self,
        from: &Path,
        to: &Path,
        mode: AdjacentMode,
    ) -> Result<Outcome, MutationError> {
        self.document.move_step(from, to, mode)
    }

    pub fn copy(&self, path: &Path) -> Option<CopiedStep> {
        self.document.copy(path)
    }

    /// Pastes a copied step next to the step at `path`.
    pub fn paste(
        &mut self,
        path: &Path,
        step: &CopiedStep,
        mode: AdjacentMode,
    ) -> Result<Outcome, MutationError> {
        self.document
            .insert_adjacent(path, step.to_step_holder(), mode)
    }

    /// The edits offered for the node at `path`, or `None` when nothing is
    /// stored there.
    pub fn interaction(&self, path: &Path) -> Option<NodeInteraction> {
        if self.document.is_root_path(path) {
            let kind = self.document.kind();
            return Some(kind.interaction_override().unwrap_or_else(|| {
                self.context
                    .capabilities_of(self.document.root_segment(), PathRole::Root)
            }));
        }
        let (_, processor_name) = self.document.processor_at(path)?;
        Some(
            self.context
                .capabilities_of(&processor_name, PathRole::Interior),
        )
    }

    pub fn build_graph(&self) -> VisualGraph {
        self.context.graph_builder().build(&self.document)
    }

    pub fn build_subgraph(&self, path: &Path) -> Option<VisualGraph> {
        self.context.graph_builder().build_subgraph(&self.document, path)
    }

    /// Reads the expression held by the object at `path`.
    pub fn parse_expression(&self, path: &Path) -> ExpressionModel {
        self.document
            .resolve(path)
            .map(|holder| expression::parse(holder, &self.context.languages))
            .unwrap_or_default()
    }

    /// Writes an expression in canonical form into the object at `path`,
    /// creating the holder when its parent exists.
    pub fn serialize_expression(
        &mut self,
        path: &Path,
        language: Option<&str>,
        model: Value,
    ) -> Outcome {
        if self.document.resolve(path).is_none()
            && self.document.set(path, Value::Null) == Outcome::Skipped
        {
            tracing::debug!(%path, "skipping expression write: holder unreachable");
            return Outcome::Skipped;
        }
        match crate::path::resolve_mut(self.document.value_mut(), path) {
            Some(holder) => expression::serialize(holder, language, model, &self.context.languages),
            None => Outcome::Skipped,
        }
    }
}
