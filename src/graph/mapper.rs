use super::NodeIndex;
use super::context::BuildContext;
use super::mappers::{ChoiceMapper, DoTryMapper, FromMapper, ParallelMapper};
use crate::path::Path;
use ahash::AHashMap;
use std::sync::Arc;

/// Turns the processor stored at a path into a node and its subtree.
pub trait NodeMapper: Send + Sync {
    /// The processor this mapper handles by default.
    fn processor_name(&self) -> &str;
    fn build(&self, ctx: &mut BuildContext<'_>, path: &Path, processor_name: &str) -> NodeIndex;
}

/// Builds one child group per steps property the catalog declares.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultMapper;

impl NodeMapper for DefaultMapper {
    fn processor_name(&self) -> &str {
        "*"
    }

    fn build(&self, ctx: &mut BuildContext<'_>, path: &Path, processor_name: &str) -> NodeIndex {
        let node = ctx.create_node(path, processor_name);
        for property in ctx.catalog().steps_properties(processor_name) {
            let children = ctx.children_of_property(path, property);
            ctx.add_children(node, children);
        }
        node
    }
}

/// Processor name to mapper, with [`DefaultMapper`] as the fallback.
#[derive(Clone)]
pub struct MapperRegistry {
    mappers: AHashMap<String, Arc<dyn NodeMapper>>,
    fallback: Arc<dyn NodeMapper>,
}

impl Default for MapperRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for MapperRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.mappers.keys().collect();
        names.sort();
        f.debug_struct("MapperRegistry").field("mappers", &names).finish()
    }
}

impl MapperRegistry {
    /// A registry where every processor uses the default mapper.
    pub fn new() -> Self {
        Self {
            mappers: AHashMap::new(),
            fallback: Arc::new(DefaultMapper),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert(Arc::new(ChoiceMapper));
        registry.insert(Arc::new(FromMapper));
        registry.insert(Arc::new(DoTryMapper));
        for name in ParallelMapper::PROCESSORS {
            registry.insert(Arc::new(ParallelMapper::new(name)));
        }
        registry
    }

    /// Registers `mapper` under its own processor name, replacing any previous one.
    pub fn insert(&mut self, mapper: Arc<dyn NodeMapper>) {
        self.mappers
            .insert(mapper.processor_name().to_string(), mapper);
    }

    /// Registers `mapper` under an explicit processor name.
    pub fn insert_as(&mut self, processor_name: &str, mapper: Arc<dyn NodeMapper>) {
        self.mappers.insert(processor_name.to_string(), mapper);
    }

    /// Makes `processor_name` use the mapper already registered for `mapped_as`.
    /// Returns `false` when `mapped_as` has no mapper.
    pub fn alias(&mut self, processor_name: &str, mapped_as: &str) -> bool {
        match self.mappers.get(mapped_as).cloned() {
            Some(mapper) => {
                self.mappers.insert(processor_name.to_string(), mapper);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, processor_name: &str) -> bool {
        self.mappers.contains_key(processor_name)
    }

    pub fn get(&self, processor_name: &str) -> &dyn NodeMapper {
        &**self.mappers.get(processor_name).unwrap_or(&self.fallback)
    }
}
