use super::VisualGraph;
use super::context::BuildContext;
use super::mapper::MapperRegistry;
use crate::catalog::{Catalog, StepsProperty, StepsPropertyType};
use crate::document::{EntityKind, FlowDocument};
use crate::path::Path;

/// Builds [`VisualGraph`]s for documents against a catalog and mapper set.
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder<'a> {
    catalog: &'a Catalog,
    mappers: &'a MapperRegistry,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(catalog: &'a Catalog, mappers: &'a MapperRegistry) -> Self {
        Self { catalog, mappers }
    }

    /// The graph of the whole entity.
    pub fn build(&self, document: &FlowDocument) -> VisualGraph {
        let mut ctx = self.context(document);
        let root_path = document.root_path();
        let kind = document.kind();

        let root = match kind {
            EntityKind::Route => {
                let root = ctx.create_entity_node(&root_path, kind);
                let from_path = root_path.child("from");
                if ctx.value_at(&from_path).is_some() {
                    let from = ctx.build(&from_path, "from");
                    ctx.add_child(root, from);
                }
                root
            }
            EntityKind::RouteConfiguration => {
                let root = ctx.create_entity_node(&root_path, kind);
                for property in self.catalog.steps_properties(document.root_segment()) {
                    let children = ctx.children_of_property(&root_path, property);
                    ctx.add_children(root, children);
                }
                root
            }
            kind if kind.has_root_steps() => {
                let root = ctx.create_entity_node(&root_path, kind);
                let steps = ctx.children_of_property(
                    &root_path,
                    &StepsProperty::new("steps", StepsPropertyType::Branch),
                );
                ctx.add_children(root, steps);
                root
            }
            kind => ctx.create_entity_node(&root_path, kind),
        };

        tracing::debug!(entity = %kind, root = %root_path, "built visualization graph");
        ctx.finish(root, kind)
    }

    /// The graph of the subtree rooted at `path`, or `None` when nothing is
    /// stored there. The document root yields the whole entity and a step
    /// holder yields the step it holds.
    pub fn build_subgraph(&self, document: &FlowDocument, path: &Path) -> Option<VisualGraph> {
        if document.is_root_path(path) {
            return Some(self.build(document));
        }
        let (path, processor_name) = document.processor_at(path)?;

        let mut ctx = self.context(document);
        let root = ctx.build(&path, &processor_name);
        Some(ctx.finish(root, document.kind()))
    }

    fn context<'d>(&'d self, document: &'d FlowDocument) -> BuildContext<'d> {
        let entity_id = document
            .id()
            .unwrap_or_else(|| document.root_segment())
            .to_string();
        BuildContext::new(document.value(), self.catalog, self.mappers, entity_id)
    }
}
