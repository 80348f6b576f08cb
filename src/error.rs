use crate::path::Path;
use thiserror::Error;

/// Errors that can occur while parsing a textual path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Path must not be empty")]
    Empty,

    #[error("Path contains an empty segment at position {position}")]
    EmptySegment { position: usize },

    #[error("Index '{token}' at position {position} has a leading zero")]
    LeadingZero { position: usize, token: String },
}

/// Errors raised by the mutation engine for edits that cannot be expressed
/// against a resolvable path.
///
/// An unresolvable path is not an error: it is reported as `Outcome::Skipped`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("Processor '{processor}' has no steps property named '{property}'")]
    UnknownStepsProperty { processor: String, property: String },

    #[error("Value at '{path}' is not an array")]
    NotAnArray { path: Path },

    #[error("Path '{path}' does not address an element of an array")]
    UnsupportedTail { path: Path },

    #[error("Cannot move '{from}' into its own subtree at '{to}'")]
    MoveIntoSelf { from: Path, to: Path },

    #[error("Path '{path}' is the root of the flow; remove the flow instead")]
    RootRemoval { path: Path },
}

/// Errors that can occur when loading catalog or language definitions.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse catalog JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Catalog entry '{0}' is invalid: {1}")]
    InvalidEntry(String, String),
}

/// Errors that can occur when a loader hands over a flow document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Flow document root must be an object")]
    NotAnObject,

    #[error("Flow document has no root segment")]
    MissingRootSegment,

    #[error("Flow document has more than one root segment: {0:?}")]
    MultipleRootSegments(Vec<String>),

    #[error("Failed to parse flow document JSON: {0}")]
    JsonParseError(String),
}
