//! # flowpath - Path-Addressable Flow Documents
//!
//! **flowpath** is the document core of a visual editor for integration-flow
//! documents: routes, error handlers, REST descriptors and the like, stored as
//! nested JSON trees. Every nested node gets a textual address, and every
//! structural edit is expressed against such an address.
//!
//! ## Core Workflow
//!
//! 1.  **Build a Context**: `EditorContext::builder()` bundles the processor catalog,
//!     the expression languages and the graph mappers. Override any of them before `build()`.
//! 2.  **Load a Document**: wrap a `serde_json::Value` with `FlowDocument::from_value`.
//!     The single top-level key (`route`, `intercept`, ...) decides the entity kind.
//! 3.  **Edit**: a `FlowEditor` resolves paths like `route.from.steps.1.choice.when.0`
//!     and inserts, replaces, removes or moves steps there.
//! 4.  **Render**: after each edit, `build_graph()` produces a fresh `VisualGraph`
//!     with parent/child groups and previous/next links.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowpath::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! fn main() -> Result<()> {
//!     let context = Arc::new(EditorContext::builder().build());
//!     let document = FlowDocument::from_value(json!({
//!         "route": {
//!             "id": "route-1234",
//!             "from": {
//!                 "uri": "timer:tick",
//!                 "steps": [
//!                     { "setBody": { "simple": "${date:now}" } },
//!                     { "to": { "uri": "log:out" } }
//!                 ]
//!             }
//!         }
//!     }))?;
//!     let mut editor = FlowEditor::new(context, document);
//!
//!     // Add a step right after `setBody`.
//!     let path: Path = "route.from.steps.0".parse()?;
//!     let outcome =
//!         editor.insert_adjacent(&path, json!({ "log": { "message": "${body}" } }), AdjacentMode::After)?;
//!     assert!(outcome.is_applied());
//!
//!     // The expression of `setBody` is read in whatever form it was written.
//!     let expression = editor.parse_expression(&"route.from.steps.0.setBody".parse()?);
//!     println!("{:?}", expression.language);
//!
//!     // Rebuild the graph and print it as a tree.
//!     println!("{}", editor.build_graph());
//!     Ok(())
//! }
//! ```

pub mod capability;
pub mod catalog;
pub mod document;
pub mod editor;
pub mod error;
pub mod expression;
pub mod graph;
pub mod path;
pub mod prelude;
