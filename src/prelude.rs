//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the flowpath crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowpath::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/route.json")?;
//! let document = FlowDocument::from_json(&json)?;
//! let editor = FlowEditor::new(std::sync::Arc::new(EditorContext::default()), document);
//!
//! let path: Path = "route.from.steps.0".parse()?;
//! println!("{:?}", editor.interaction(&path));
//! # Ok(())
//! # }
//! ```

// Editor surface
pub use crate::editor::{EditorContext, EditorContextBuilder, FlowEditor};

// Documents and edits
pub use crate::document::{AdjacentMode, ChildInsertMode, CopiedStep, EntityKind, FlowDocument};
pub use crate::path::{Outcome, Path, Segment, Tail};

// Catalog and capabilities
pub use crate::capability::{NodeInteraction, PathRole};
pub use crate::catalog::{Catalog, LanguageRegistry, StepsProperty, StepsPropertyType};

// Graph and expressions
pub use crate::expression::ExpressionModel;
pub use crate::graph::{NodeIndex, NodeMapper, VisualGraph, VisualNode};

// Error types
pub use crate::error::{CatalogError, DocumentError, MutationError, PathError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
