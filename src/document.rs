#![allow(clippy::self_named_module_files)]

//! Arena-backed JSON document tree.
//!
//! Every node lives in a [`Document`] and is addressed by a [`NodeId`]. A node
//! knows its container through a [`ParentLink`] (container id plus the key or
//! index locating it), which is a plain id and never owns anything. Insertion
//! primitives keep the tree single-parent: a node that already has a parent,
//! is the container itself, or is the container's root is deep-cloned before
//! it is attached.

use crate::{MergeError, MergeResult};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

pub mod equality;
mod node_ref;
mod scalar;

pub use node_ref::NodeRef;
pub use scalar::{Scalar, ScalarRef};

static NEXT_ARENA: AtomicU64 = AtomicU64::new(1);

fn next_arena() -> u64 {
    NEXT_ARENA.fetch_add(1, Ordering::Relaxed)
}

/// Handle to a node inside a [`Document`].
///
/// An id carries the tag of the arena that issued it, so ids from another
/// document, or from before [`Document::compact`], are rejected rather than
/// resolving to an unrelated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    arena: u64,
    index: usize,
}

impl NodeId {
    /// Position of the node in its document's arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// The three node variants of a JSON tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Object,
    Array,
    /// Scalar leaf, including JSON null.
    Value,
}

impl NodeKind {
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::Value => "value",
        };
        f.write_str(name)
    }
}

/// Location of a node inside its container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Property(String),
    Index(usize),
}

/// Non-owning link from a node to the container holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentLink {
    pub container: NodeId,
    pub slot: Slot,
}

#[derive(Debug, Clone)]
pub(crate) enum NodeData {
    Object(IndexMap<String, NodeId>),
    Array(Vec<NodeId>),
    Value(Scalar),
}

impl NodeData {
    const fn kind(&self) -> NodeKind {
        match self {
            Self::Object(_) => NodeKind::Object,
            Self::Array(_) => NodeKind::Array,
            Self::Value(_) => NodeKind::Value,
        }
    }
}

#[derive(Debug, Clone)]
struct NodeEntry {
    data: NodeData,
    parent: Option<ParentLink>,
}

/// A mutable JSON tree with parent links and node identity.
///
/// A clone keeps the arena tag, so ids issued before cloning name the
/// corresponding nodes in both copies.
#[derive(Debug, Clone)]
pub struct Document {
    arena: u64,
    nodes: Vec<NodeEntry>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document whose root is an empty object.
    #[must_use]
    pub fn new() -> Self {
        let mut doc = Self::empty();
        doc.root = doc.create_object();
        doc
    }

    /// Builds a document from a `serde_json` tree, preserving key order.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let mut doc = Self::empty();
        doc.root = doc.import(NodeRef::Json(value));
        doc
    }

    /// Parses JSON text into a document.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Json`] if the text is not valid JSON.
    pub fn parse(text: &str) -> MergeResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    fn empty() -> Self {
        let arena = next_arena();
        Self { arena, nodes: Vec::new(), root: NodeId { arena, index: 0 } }
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Whether `id` was issued by this document.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.arena == self.arena && id.index < self.nodes.len()
    }

    fn entry(&self, id: NodeId) -> Option<&NodeEntry> {
        if id.arena == self.arena {
            self.nodes.get(id.index)
        } else {
            None
        }
    }

    fn entry_mut(&mut self, id: NodeId) -> Option<&mut NodeEntry> {
        if id.arena == self.arena {
            self.nodes.get_mut(id.index)
        } else {
            None
        }
    }

    pub(crate) fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.entry(id).map(|entry| &entry.data)
    }

    fn data_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.entry_mut(id).map(|entry| &mut entry.data)
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.data(id).map(NodeData::kind)
    }

    #[must_use]
    pub fn is_container(&self, id: NodeId) -> bool {
        self.kind(id).is_some_and(NodeKind::is_container)
    }

    #[must_use]
    pub fn scalar(&self, id: NodeId) -> Option<&Scalar> {
        match self.data(id) {
            Some(NodeData::Value(scalar)) => Some(scalar),
            _ => None,
        }
    }

    /// Whether the node is a JSON null value.
    #[must_use]
    pub fn is_null(&self, id: NodeId) -> bool {
        self.scalar(id).is_some_and(Scalar::is_null)
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<&ParentLink> {
        self.entry(id).and_then(|entry| entry.parent.as_ref())
    }

    /// Follows parent links up to the topmost ancestor of `id`.
    #[must_use]
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(link) = self.parent(current) {
            current = link.container;
        }
        current
    }

    /// Number of children of a container, zero for scalars.
    #[must_use]
    pub fn len(&self, id: NodeId) -> usize {
        match self.data(id) {
            Some(NodeData::Object(map)) => map.len(),
            Some(NodeData::Array(items)) => items.len(),
            Some(NodeData::Value(_)) | None => 0,
        }
    }

    /// Looks up a property by exact name.
    #[must_use]
    pub fn get(&self, object: NodeId, key: &str) -> Option<NodeId> {
        match self.data(object) {
            Some(NodeData::Object(map)) => map.get(key).copied(),
            _ => None,
        }
    }

    #[must_use]
    pub fn index(&self, array: NodeId, index: usize) -> Option<NodeId> {
        self.elements(array).get(index).copied()
    }

    /// Properties of an object in insertion order; empty for other kinds.
    pub fn entries(&self, object: NodeId) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        let map = match self.data(object) {
            Some(NodeData::Object(map)) => Some(map),
            _ => None,
        };
        map.into_iter().flat_map(|map| map.iter().map(|(key, id)| (key.as_str(), *id)))
    }

    /// Elements of an array; empty for other kinds.
    #[must_use]
    pub fn elements(&self, array: NodeId) -> &[NodeId] {
        match self.data(array) {
            Some(NodeData::Array(items)) => items,
            _ => &[],
        }
    }

    #[must_use]
    pub fn node_ref(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.contains(id).then_some(NodeRef::Arena(self, id))
    }

    /// Converts the subtree at `id` into a `serde_json` value.
    #[must_use]
    pub fn to_value(&self, id: NodeId) -> Option<Value> {
        self.node_ref(id).map(|node| node.to_value())
    }

    /// Converts the whole document into a `serde_json` value.
    #[must_use]
    pub fn root_value(&self) -> Value {
        NodeRef::Arena(self, self.root).to_value()
    }

    /// Pretty-printed JSON text of the subtree at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::UnknownNode`] if `id` does not belong to this document.
    pub fn to_string_pretty(&self, id: NodeId) -> MergeResult<String> {
        let node = self.node_ref(id).ok_or(MergeError::UnknownNode(id))?;
        Ok(serde_json::to_string_pretty(&node)?)
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId { arena: self.arena, index: self.nodes.len() };
        self.nodes.push(NodeEntry { data, parent: None });
        id
    }

    /// Creates a detached empty object.
    pub fn create_object(&mut self) -> NodeId {
        self.alloc(NodeData::Object(IndexMap::new()))
    }

    /// Creates a detached empty array.
    pub fn create_array(&mut self) -> NodeId {
        self.alloc(NodeData::Array(Vec::new()))
    }

    /// Creates a detached scalar node.
    pub fn create_value(&mut self, value: impl Into<Scalar>) -> NodeId {
        self.alloc(NodeData::Value(value.into()))
    }

    fn ensure_node(&self, id: NodeId) -> MergeResult<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(MergeError::UnknownNode(id))
        }
    }

    fn expect_kind(&self, id: NodeId, expected: NodeKind) -> MergeResult<()> {
        let actual = self.kind(id).ok_or(MergeError::UnknownNode(id))?;
        if actual == expected {
            Ok(())
        } else {
            Err(MergeError::KindMismatch { node: id, expected, actual })
        }
    }

    /// Returns `node` itself when it can be attached under `container`, or a
    /// deep clone when attaching it would give it a second parent or a cycle.
    fn adopt(&mut self, container: NodeId, node: NodeId) -> NodeId {
        let must_clone = self.parent(node).is_some()
            || node == container
            || node == self.root
            || self.root_of(container) == node;
        if must_clone {
            self.clone_subtree(node)
        } else {
            node
        }
    }

    fn set_parent(&mut self, id: NodeId, parent: Option<ParentLink>) {
        if let Some(entry) = self.entry_mut(id) {
            entry.parent = parent;
        }
    }

    fn append_child(&mut self, array: NodeId, child: NodeId) {
        let index = match self.data_mut(array) {
            Some(NodeData::Array(items)) => {
                items.push(child);
                items.len() - 1
            },
            _ => return,
        };
        self.set_parent(child, Some(ParentLink { container: array, slot: Slot::Index(index) }));
    }

    fn insert_child(&mut self, object: NodeId, key: String, child: NodeId) {
        let displaced = match self.data_mut(object) {
            Some(NodeData::Object(map)) => map.insert(key.clone(), child),
            _ => return,
        };
        if let Some(old) = displaced.filter(|old| *old != child) {
            self.set_parent(old, None);
        }
        self.set_parent(child, Some(ParentLink { container: object, slot: Slot::Property(key) }));
    }

    /// Sets `object[key]`, appending the key if it is new and keeping its
    /// position otherwise. Returns the id actually attached, which is a clone
    /// of `node` when `node` already has a parent.
    ///
    /// # Errors
    ///
    /// Returns an error if either id is unknown or `object` is not an object.
    pub fn set_property(
        &mut self,
        object: NodeId,
        key: impl Into<String>,
        node: NodeId,
    ) -> MergeResult<NodeId> {
        self.expect_kind(object, NodeKind::Object)?;
        self.ensure_node(node)?;
        let child = self.adopt(object, node);
        self.insert_child(object, key.into(), child);
        Ok(child)
    }

    /// Appends `node` to `array`. Returns the id actually attached.
    ///
    /// # Errors
    ///
    /// Returns an error if either id is unknown or `array` is not an array.
    pub fn push(&mut self, array: NodeId, node: NodeId) -> MergeResult<NodeId> {
        self.expect_kind(array, NodeKind::Array)?;
        self.ensure_node(node)?;
        let child = self.adopt(array, node);
        self.append_child(array, child);
        Ok(child)
    }

    /// Replaces `array[index]`. Returns the id actually attached.
    ///
    /// # Errors
    ///
    /// Returns an error if either id is unknown, `array` is not an array, or
    /// `index` is past the end.
    pub fn set_index(&mut self, array: NodeId, index: usize, node: NodeId) -> MergeResult<NodeId> {
        self.expect_kind(array, NodeKind::Array)?;
        self.ensure_node(node)?;
        let len = self.len(array);
        if index >= len {
            return Err(MergeError::IndexOutOfRange { node: array, index, len });
        }
        let child = self.adopt(array, node);
        let displaced = match self.data_mut(array) {
            Some(NodeData::Array(items)) => std::mem::replace(&mut items[index], child),
            _ => return Err(MergeError::UnknownNode(array)),
        };
        if displaced != child {
            self.set_parent(displaced, None);
        }
        self.set_parent(child, Some(ParentLink { container: array, slot: Slot::Index(index) }));
        Ok(child)
    }

    /// Removes every child of a container, leaving the children detached.
    ///
    /// # Errors
    ///
    /// Returns an error if `container` is unknown or is a scalar.
    pub fn clear(&mut self, container: NodeId) -> MergeResult<()> {
        let children: Vec<NodeId> = match self.data_mut(container) {
            Some(NodeData::Array(items)) => std::mem::take(items),
            Some(NodeData::Object(map)) => std::mem::take(map).into_values().collect(),
            Some(NodeData::Value(_)) => {
                return Err(MergeError::KindMismatch {
                    node: container,
                    expected: NodeKind::Array,
                    actual: NodeKind::Value,
                })
            },
            None => return Err(MergeError::UnknownNode(container)),
        };
        for child in children {
            self.set_parent(child, None);
        }
        Ok(())
    }

    /// Creates a detached deep copy of the subtree at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::UnknownNode`] if `id` does not belong to this document.
    pub fn deep_clone(&mut self, id: NodeId) -> MergeResult<NodeId> {
        self.ensure_node(id)?;
        Ok(self.clone_subtree(id))
    }

    fn clone_subtree(&mut self, id: NodeId) -> NodeId {
        let data = self.data(id).cloned().unwrap_or(NodeData::Value(Scalar::Null));
        match data {
            NodeData::Value(scalar) => self.alloc(NodeData::Value(scalar)),
            NodeData::Array(items) => {
                let array = self.create_array();
                for item in items {
                    let copy = self.clone_subtree(item);
                    self.append_child(array, copy);
                }
                array
            },
            NodeData::Object(map) => {
                let object = self.create_object();
                for (key, item) in map {
                    let copy = self.clone_subtree(item);
                    self.insert_child(object, key, copy);
                }
                object
            },
        }
    }

    /// Copies a tree owned elsewhere (another document, a `serde_json`
    /// value, a bare scalar) into this document as a detached subtree.
    pub fn import(&mut self, node: NodeRef<'_>) -> NodeId {
        match node.kind() {
            NodeKind::Value => {
                let scalar = node.scalar().map_or(Scalar::Null, ScalarRef::to_owned_scalar);
                self.alloc(NodeData::Value(scalar))
            },
            NodeKind::Array => {
                let array = self.create_array();
                for item in node.elements() {
                    let copy = self.import(item);
                    self.append_child(array, copy);
                }
                array
            },
            NodeKind::Object => {
                let object = self.create_object();
                for (key, item) in node.entries() {
                    let copy = self.import(item);
                    self.insert_child(object, key.to_string(), copy);
                }
                object
            },
        }
    }

    /// Rebuilds the arena with only the nodes reachable from the root,
    /// dropping detached leftovers.
    ///
    /// The rebuilt arena gets a new tag: every id issued before the call,
    /// the old root included, is rejected with [`MergeError::UnknownNode`]
    /// afterwards. Look nodes up again from [`Document::root`].
    pub fn compact(&mut self) {
        let mut fresh = Self::empty();
        fresh.root = fresh.import(NodeRef::Arena(self, self.root));
        *self = fresh;
    }

    /// Number of nodes held by the arena, attached or not.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        NodeRef::Arena(self, self.root) == NodeRef::Arena(other, other.root)
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl From<&Value> for Document {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

impl FromStr for Document {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string_pretty(&NodeRef::Arena(self, self.root))
            .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeRef::Arena(self, self.root).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| Self::from_value(&value))
    }
}
