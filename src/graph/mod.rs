//! The visualization graph: an arena of addressable nodes with parent/child
//! groups and previous/next sibling links, rebuilt from the document on demand.

use crate::document::EntityKind;
use crate::path::Path;
use serde::Serialize;
use std::fmt;

mod builder;
mod context;
mod mapper;
mod mappers;

pub use builder::GraphBuilder;
pub use context::BuildContext;
pub use mapper::{DefaultMapper, MapperRegistry, NodeMapper};
pub use mappers::{ChoiceMapper, DoTryMapper, FromMapper, ParallelMapper};

/// Position of a node inside its [`VisualGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Where the presentation metadata of a node comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CatalogKind {
    Entity,
    Processor,
    Component,
    Kamelet,
}

/// One node of the visualization graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualNode {
    pub id: String,
    pub path: Path,
    pub processor_name: String,
    pub catalog_kind: CatalogKind,
    pub component_name: Option<String>,
    pub title: String,
    pub label: String,
    pub icon: Option<String>,
    pub is_group: bool,
    pub parent: Option<NodeIndex>,
    pub children: Vec<NodeIndex>,
    pub previous: Option<NodeIndex>,
    pub next: Option<NodeIndex>,
}

/// A graph built from one flow document.
///
/// The graph only references the document through paths; it is discarded and
/// rebuilt after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualGraph {
    entity_id: String,
    entity_kind: EntityKind,
    root: NodeIndex,
    nodes: Vec<VisualNode>,
}

impl VisualGraph {
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn entity_kind(&self) -> EntityKind {
        self.entity_kind
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn root_node(&self) -> &VisualNode {
        &self.nodes[self.root.0]
    }

    pub fn node(&self, index: NodeIndex) -> &VisualNode {
        &self.nodes[index.0]
    }

    pub fn get(&self, index: NodeIndex) -> Option<&VisualNode> {
        self.nodes.get(index.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes with their indices, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &VisualNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeIndex(i), n))
    }

    pub fn children(&self, index: NodeIndex) -> impl Iterator<Item = &VisualNode> {
        self.nodes[index.0].children.iter().map(|c| &self.nodes[c.0])
    }

    pub fn next(&self, index: NodeIndex) -> Option<&VisualNode> {
        self.nodes[index.0].next.map(|n| &self.nodes[n.0])
    }

    pub fn previous(&self, index: NodeIndex) -> Option<&VisualNode> {
        self.nodes[index.0].previous.map(|n| &self.nodes[n.0])
    }

    pub fn find_by_path(&self, path: &Path) -> Option<NodeIndex> {
        self.iter().find(|(_, n)| n.path == *path).map(|(i, _)| i)
    }

    pub fn find_by_id(&self, id: &str) -> Option<NodeIndex> {
        self.iter().find(|(_, n)| n.id == id).map(|(i, _)| i)
    }

    /// Follows `next` links from `start`, including `start` itself.
    pub fn chain(&self, start: NodeIndex) -> Vec<NodeIndex> {
        std::iter::successors(Some(start), |i| self.nodes[i.0].next).collect()
    }
}

impl fmt::Display for VisualGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_as_tree(self.root, f, "", true)
    }
}

impl VisualGraph {
    fn fmt_as_tree(
        &self,
        index: NodeIndex,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let node = self.node(index);
        let node_marker = if is_last { "└── " } else { "├── " };
        write!(f, "{}{}{}", prefix, node_marker, node.processor_name)?;
        if node.label != node.processor_name {
            write!(f, " ({})", node.label)?;
        }
        writeln!(f, " [{}]", node.path)?;

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            self.fmt_as_tree(*child, f, &child_prefix, i + 1 == count)?;
        }
        Ok(())
    }
}
