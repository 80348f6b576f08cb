use super::mapper::MapperRegistry;
use super::{CatalogKind, NodeIndex, VisualGraph, VisualNode};
use crate::catalog::{Catalog, StepsProperty, StepsPropertyType};
use crate::document::EntityKind;
use crate::path::{self, Path};
use ahash::AHashSet;
use itertools::Itertools;
use serde_json::Value;

/// Processors whose endpoint is given by a `uri`.
const URI_PROCESSORS: &[&str] = &["from", "to", "toD", "poll", "wireTap", "enrich", "pollEnrich"];

/// State shared by the mappers while one graph is being built.
pub struct BuildContext<'a> {
    document: &'a Value,
    catalog: &'a Catalog,
    mappers: &'a MapperRegistry,
    entity_id: String,
    nodes: Vec<VisualNode>,
    flatten: AHashSet<NodeIndex>,
}

impl<'a> BuildContext<'a> {
    pub(super) fn new(
        document: &'a Value,
        catalog: &'a Catalog,
        mappers: &'a MapperRegistry,
        entity_id: String,
    ) -> Self {
        Self {
            document,
            catalog,
            mappers,
            entity_id,
            nodes: Vec::new(),
            flatten: AHashSet::new(),
        }
    }

    pub fn document(&self) -> &'a Value {
        self.document
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn value_at(&self, path: &Path) -> Option<&'a Value> {
        path::resolve(self.document, path)
    }

    pub fn node(&self, index: NodeIndex) -> &VisualNode {
        &self.nodes[index.0]
    }

    /// Builds the subtree at `path` with the mapper registered for
    /// `processor_name`, or the default mapper.
    pub fn build(&mut self, path: &Path, processor_name: &str) -> NodeIndex {
        let mappers = self.mappers;
        tracing::trace!(%path, processor_name, "mapping node");
        mappers.get(processor_name).build(self, path, processor_name)
    }

    /// Creates a node for the processor at `path` without any children.
    pub fn create_node(&mut self, path: &Path, processor_name: &str) -> NodeIndex {
        let value = self.value_at(path);
        let component_name = value.and_then(|v| component_name(processor_name, v));
        let catalog_kind = match component_name.as_deref() {
            Some("kamelet") => CatalogKind::Kamelet,
            Some(_) => CatalogKind::Component,
            None => CatalogKind::Processor,
        };

        let (title, icon) = match component_name
            .as_deref()
            .and_then(|c| self.catalog.component(c))
        {
            Some(component) => (component.title.clone(), component.icon.clone()),
            None => match self.catalog.processor(processor_name) {
                Some(processor) => (processor.title.clone(), processor.icon.clone()),
                None => (
                    component_name
                        .clone()
                        .unwrap_or_else(|| processor_name.to_string()),
                    None,
                ),
            },
        };

        let label = value
            .and_then(|v| v.get("description").or_else(|| v.get("id")))
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| component_name.clone())
            .unwrap_or_else(|| processor_name.to_string());

        self.push(VisualNode {
            id: format!("{}|{}", self.entity_id, path),
            path: path.clone(),
            processor_name: processor_name.to_string(),
            catalog_kind,
            component_name,
            title,
            label,
            icon,
            is_group: false,
            parent: None,
            children: Vec::new(),
            previous: None,
            next: None,
        })
    }

    /// Creates the root node of an entity.
    pub fn create_entity_node(&mut self, path: &Path, kind: EntityKind) -> NodeIndex {
        let processor_name = path.last_name().unwrap_or_default().to_string();
        let label = self
            .value_at(path)
            .and_then(|v| v.get("description").or_else(|| v.get("id")))
            .and_then(Value::as_str)
            .unwrap_or(processor_name.as_str())
            .to_string();
        let title = self
            .catalog
            .processor(&processor_name)
            .map(|p| p.title.clone())
            .unwrap_or_else(|| kind.to_string());
        self.push(VisualNode {
            id: format!("{}|{}", self.entity_id, path),
            path: path.clone(),
            processor_name,
            catalog_kind: CatalogKind::Entity,
            component_name: None,
            title,
            label,
            icon: None,
            is_group: false,
            parent: None,
            children: Vec::new(),
            previous: None,
            next: None,
        })
    }

    fn push(&mut self, node: VisualNode) -> NodeIndex {
        let index = NodeIndex(self.nodes.len());
        self.nodes.push(node);
        index
    }

    /// Marks a node whose children are lifted into its parent on attach.
    pub fn mark_flatten(&mut self, index: NodeIndex) {
        self.flatten.insert(index);
    }

    /// Attaches `child` to `parent`. A node marked with [`mark_flatten`]
    /// hands its children over to `parent`, placed right after it, and is
    /// linked to the first of them.
    ///
    /// [`mark_flatten`]: BuildContext::mark_flatten
    pub fn add_child(&mut self, parent: NodeIndex, child: NodeIndex) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);

        if !self.flatten.remove(&child) {
            return;
        }
        let lifted = std::mem::take(&mut self.nodes[child.0].children);
        if let Some(&first) = lifted.first() {
            self.link(child, first);
        }
        for grandchild in lifted {
            self.nodes[grandchild.0].parent = Some(parent);
            self.nodes[parent.0].children.push(grandchild);
        }
    }

    pub fn add_children(&mut self, parent: NodeIndex, children: Vec<NodeIndex>) {
        for child in children {
            self.add_child(parent, child);
        }
    }

    /// Links `a -> b` as consecutive siblings.
    pub fn link(&mut self, a: NodeIndex, b: NodeIndex) {
        self.nodes[a.0].next = Some(b);
        self.nodes[b.0].previous = Some(a);
    }

    /// Links every pair of consecutive nodes in `chain`.
    pub fn link_chain(&mut self, chain: &[NodeIndex]) {
        for (a, b) in chain.iter().copied().tuple_windows() {
            self.link(a, b);
        }
    }

    /// Builds the children stored under `property` of the processor at `path`.
    ///
    /// Branch children are chained in document order; clause children are
    /// alternatives and stay unlinked.
    pub fn children_of_property(&mut self, path: &Path, property: &StepsProperty) -> Vec<NodeIndex> {
        match property.kind {
            StepsPropertyType::Branch => {
                let children = self.branch_children(&path.child(&property.name));
                self.link_chain(&children);
                children
            }
            StepsPropertyType::Array => self.clause_array_children(path, &property.name),
            StepsPropertyType::SingleClause => {
                let clause_path = path.child(&property.name);
                match self.value_at(&clause_path) {
                    Some(value) if !value.is_null() => {
                        vec![self.build(&clause_path, &property.name)]
                    }
                    _ => Vec::new(),
                }
            }
        }
    }

    /// Builds one node per step holder of the array at `steps_path`, without
    /// linking them.
    pub fn branch_children(&mut self, steps_path: &Path) -> Vec<NodeIndex> {
        let Some(Value::Array(steps)) = self.value_at(steps_path) else {
            return Vec::new();
        };
        steps
            .iter()
            .enumerate()
            .filter_map(|(i, step)| {
                let name = step.as_object()?.keys().next()?;
                Some((steps_path.at(i).child(name), name.clone()))
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|(child_path, name)| self.build(&child_path, &name))
            .collect()
    }

    /// Clause entries may also be wrapped as `{ "<name>": { ... } }`, as route
    /// configurations store their interceptors.
    fn clause_array_children(&mut self, path: &Path, name: &str) -> Vec<NodeIndex> {
        let array_path = path.child(name);
        let Some(Value::Array(items)) = self.value_at(&array_path) else {
            return Vec::new();
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item.as_object() {
                Some(holder) if holder.len() == 1 && holder.contains_key(name) => {
                    array_path.at(i).child(name)
                }
                _ => array_path.at(i),
            })
            .collect::<Vec<_>>()
            .iter()
            .map(|clause_path| self.build(clause_path, name))
            .collect()
    }

    /// A node is a group exactly when it owns children. Runs deepest nodes
    /// first, after flattening has moved children around.
    fn normalize_groups(&mut self) {
        for node in self.nodes.iter_mut().rev() {
            node.is_group = !node.children.is_empty();
        }
    }

    pub(super) fn finish(mut self, root: NodeIndex, entity_kind: EntityKind) -> VisualGraph {
        self.normalize_groups();
        VisualGraph {
            entity_id: self.entity_id,
            entity_kind,
            root,
            nodes: self.nodes,
        }
    }
}

/// The component a step talks to, taken from the scheme of its `uri`.
fn component_name(processor_name: &str, value: &Value) -> Option<String> {
    if !URI_PROCESSORS.contains(&processor_name) {
        return None;
    }
    let uri = match value {
        Value::String(uri) => uri.as_str(),
        other => other.get("uri")?.as_str()?,
    };
    let scheme = uri.split(':').next().filter(|s| !s.is_empty())?;
    Some(scheme.to_string())
}
