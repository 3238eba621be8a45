#![allow(missing_docs)]

//! Deep merge for mutable JSON document trees.
//!
//! A [`Document`] holds a JSON tree in an arena. [`Document::merge`] folds a
//! source value into one of its nodes in place: objects are merged property by
//! property, arrays according to [`ArrayHandling`], and scalars are replaced
//! unless the incoming value is null.
//!
//! ```
//! use jsonmerge::{ArrayHandling, Document, MergeSettings};
//! use serde_json::json;
//!
//! let mut doc = Document::from_value(&json!({"tags": ["a", "b"], "name": "x"}));
//! let settings = MergeSettings::default().with_array_handling(ArrayHandling::Union);
//! doc.merge_with(doc.root(), json!({"tags": ["b", "c"], "name": null}), &settings)?;
//! assert_eq!(doc.root_value(), json!({"tags": ["a", "b", "c"], "name": "x"}));
//! # Ok::<(), jsonmerge::MergeError>(())
//! ```

pub mod config;
pub mod document;
pub mod json_merge;
pub mod merge;

pub use document::{Document, NodeId, NodeKind, NodeRef, ParentLink, Scalar, Slot};
pub use merge::{ArrayHandling, Content, MergeSettings, NullValueHandling, PropertyNameComparison};

#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The merge content is neither a node, a sequence, nor a supported scalar.
    #[error("Could not determine JSON object type for type {type_name}.")]
    InvalidContentType { type_name: &'static str },

    #[error("Invalid merge configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Node {0} does not belong to this document")]
    UnknownNode(NodeId),

    #[error("Node {node} is {actual}, expected {expected}")]
    KindMismatch { node: NodeId, expected: NodeKind, actual: NodeKind },

    #[error("Index {index} is out of range for array {node} of length {len}")]
    IndexOutOfRange { node: NodeId, index: usize, len: usize },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type MergeResult<T> = Result<T, MergeError>;
