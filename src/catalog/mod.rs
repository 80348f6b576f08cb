//! Processor catalog: which properties of a processor can hold child steps,
//! and how each processor and component is presented.

use crate::error::CatalogError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

mod defaults;
pub mod language;

pub use language::{Language, LanguageRegistry};

/// The shape of a property that holds child steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepsPropertyType {
    /// Exactly one clause object, e.g. `otherwise`.
    SingleClause,
    /// An array of clause objects, e.g. `when`.
    #[serde(alias = "array-clause")]
    Array,
    /// An array of step holders (`{ "log": {...} }`), e.g. `steps`.
    Branch,
}

/// One property of a processor that may hold child steps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepsProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: StepsPropertyType,
}

impl StepsProperty {
    pub fn new(name: &str, kind: StepsPropertyType) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }

    /// Whether the property stores an array in the document.
    pub fn holds_array(&self) -> bool {
        matches!(
            self.kind,
            StepsPropertyType::Array | StepsPropertyType::Branch
        )
    }
}

/// Static metadata for a processor kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorDefinition {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub steps_properties: Vec<StepsProperty>,
}

/// Display metadata for an endpoint component (`timer`, `kafka`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    #[serde(default)]
    processors: Vec<ProcessorDefinition>,
    #[serde(default)]
    components: Vec<ComponentDefinition>,
}

/// Read-only lookup from processor or component name to its metadata.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    processors: AHashMap<String, ProcessorDefinition>,
    components: AHashMap<String, ComponentDefinition>,
}

impl Catalog {
    /// An empty catalog: every processor is a leaf.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalog of common processors and components.
    pub fn with_defaults() -> Self {
        let mut catalog = Self::default();
        defaults::register_default_processors(&mut catalog.processors);
        defaults::register_default_components(&mut catalog.components);
        catalog
    }

    /// Parses a catalog file of the form
    /// `{ "processors": [...], "components": [...] }`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = Self::default();
        catalog.merge_file(file)?;
        Ok(catalog)
    }

    /// Overlays the entries of a catalog file on top of this catalog.
    pub fn extend_from_json(&mut self, json: &str) -> Result<(), CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        self.merge_file(file)
    }

    fn merge_file(&mut self, file: CatalogFile) -> Result<(), CatalogError> {
        for processor in file.processors {
            if processor.name.is_empty() {
                return Err(CatalogError::InvalidEntry(
                    processor.title,
                    "processor name must not be empty".to_string(),
                ));
            }
            self.insert_processor(processor);
        }
        for component in file.components {
            if component.name.is_empty() {
                return Err(CatalogError::InvalidEntry(
                    component.title,
                    "component name must not be empty".to_string(),
                ));
            }
            self.insert_component(component);
        }
        Ok(())
    }

    pub fn insert_processor(&mut self, processor: ProcessorDefinition) {
        self.processors.insert(processor.name.clone(), processor);
    }

    pub fn insert_component(&mut self, component: ComponentDefinition) {
        self.components.insert(component.name.clone(), component);
    }

    pub fn processor(&self, name: &str) -> Option<&ProcessorDefinition> {
        self.processors.get(name)
    }

    pub fn component(&self, name: &str) -> Option<&ComponentDefinition> {
        self.components.get(name)
    }

    /// The steps properties of a processor, empty for leaves and unknown kinds.
    pub fn steps_properties(&self, processor_name: &str) -> &[StepsProperty] {
        self.processors
            .get(processor_name)
            .map(|p| p.steps_properties.as_slice())
            .unwrap_or(&[])
    }

    pub fn steps_property(&self, processor_name: &str, property: &str) -> Option<&StepsProperty> {
        self.steps_properties(processor_name)
            .iter()
            .find(|p| p.name == property)
    }

    pub fn processor_count(&self) -> usize {
        self.processors.len()
    }
}
