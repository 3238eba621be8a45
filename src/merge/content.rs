//! Conversion of merge inputs into [`Content`].
//!
//! Anything passed to [`Document::merge`] is first turned into a `Content`:
//! nodes of this or another document, `serde_json` values, scalars of a fixed
//! set of Rust types, or sequences of those. Types outside that set can only
//! arrive through [`Content::from_any`] and are rejected before the merge
//! touches the target.

use crate::document::{NodeData, NodeKind, NodeRef, Scalar};
use crate::{Document, MergeError, MergeResult, NodeId};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use std::any::{type_name, Any};
use std::borrow::Cow;
use std::fmt;
use uuid::Uuid;

/// Source side of a merge.
#[derive(Debug, Clone)]
pub enum Content<'a> {
    /// No content; merging it changes nothing.
    Null,
    /// A node of the document being merged into.
    Node(NodeId),
    /// A node of another document.
    Foreign(&'a Document, NodeId),
    /// A `serde_json` tree, borrowed or owned.
    Json(Cow<'a, Value>),
    /// A converted scalar that is not stored anywhere yet.
    Scalar(Scalar),
    /// A sequence whose items are converted one by one.
    Many(Vec<Content<'a>>),
    /// A value of a type with no JSON mapping.
    Unsupported(&'static str),
}

/// What a [`Content`] holds, as seen by the mergers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentClass {
    Absent,
    Node,
    Scalar,
    Multi,
    Unsupported(&'static str),
}

impl Content<'_> {
    #[must_use]
    pub const fn classify(&self) -> ContentClass {
        match self {
            Self::Null => ContentClass::Absent,
            Self::Node(_) | Self::Foreign(..) | Self::Json(_) => ContentClass::Node,
            Self::Scalar(_) => ContentClass::Scalar,
            Self::Many(_) => ContentClass::Multi,
            Self::Unsupported(name) => ContentClass::Unsupported(*name),
        }
    }

    /// Whether this content is the node `id` of the target document itself.
    #[must_use]
    pub fn is_same_node(&self, id: NodeId) -> bool {
        matches!(self, Self::Node(node) if *node == id)
    }

    /// Borrowing copy that shares any owned `serde_json` tree with `self`.
    #[must_use]
    pub fn reborrow(&self) -> Content<'_> {
        match self {
            Self::Null => Content::Null,
            Self::Node(id) => Content::Node(*id),
            Self::Foreign(doc, id) => Content::Foreign(*doc, *id),
            Self::Json(value) => Content::Json(Cow::Borrowed(value.as_ref())),
            Self::Scalar(scalar) => Content::Scalar(scalar.clone()),
            Self::Many(items) => Content::Many(items.iter().map(Self::reborrow).collect()),
            Self::Unsupported(name) => Content::Unsupported(*name),
        }
    }

    /// Converts a value whose type is only known at runtime.
    ///
    /// Recognized: `serde_json::Value`, [`Scalar`], `bool`, all primitive
    /// integers, `f32`, `f64`, `String`, `&'static str`, `char`, `chrono`
    /// date/time values, `Uuid`, plus `Option` and `Vec` of any of these. The
    /// unit type is treated as absent. Byte buffers (`Vec<u8>`, `Box<[u8]>`,
    /// `&'static [u8]`) are binary data rather than sequences and, like
    /// everything else, become [`Content::Unsupported`] carrying the type name.
    #[must_use]
    pub fn from_any<T: Any>(value: &T) -> Content<'static> {
        let any: &dyn Any = value;

        if any.is::<()>() {
            return Content::Null;
        }
        if let Some(json) = any.downcast_ref::<Value>() {
            return Content::Json(Cow::Owned(json.clone()));
        }
        if let Some(items) = any.downcast_ref::<Vec<Value>>() {
            return Content::Many(
                items.iter().map(|item| Content::Json(Cow::Owned(item.clone()))).collect(),
            );
        }

        if any.is::<Vec<u8>>() || any.is::<Box<[u8]>>() || any.is::<&'static [u8]>() {
            return Content::Unsupported(type_name::<T>());
        }

        macro_rules! downcast_scalars {
            ($($ty:ty),* $(,)?) => {
                $(
                    if let Some(v) = any.downcast_ref::<$ty>() {
                        return Content::Scalar(Scalar::from(v.clone()));
                    }
                    if let Some(v) = any.downcast_ref::<Option<$ty>>() {
                        return v.clone().map_or(Content::Null, |v| Content::Scalar(Scalar::from(v)));
                    }
                    if let Some(v) = any.downcast_ref::<Vec<$ty>>() {
                        return Content::Many(
                            v.iter().map(|item| Content::Scalar(Scalar::from(item.clone()))).collect(),
                        );
                    }
                )*
            };
        }

        downcast_scalars!(
            Scalar,
            bool,
            i8,
            i16,
            i32,
            i64,
            isize,
            u8,
            u16,
            u32,
            u64,
            usize,
            f32,
            f64,
            String,
            &'static str,
            char,
            DateTime<Utc>,
            DateTime<FixedOffset>,
            DateTime<Local>,
            NaiveDateTime,
            NaiveDate,
            Uuid,
        );

        Content::Unsupported(type_name::<T>())
    }
}

impl fmt::Display for Content<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Node(id) => write!(f, "node {id}"),
            Self::Foreign(_, id) => write!(f, "foreign node {id}"),
            Self::Json(_) => f.write_str("json value"),
            Self::Scalar(scalar) => write!(f, "scalar {scalar}"),
            Self::Many(items) => write!(f, "sequence of {}", items.len()),
            Self::Unsupported(name) => write!(f, "unsupported {name}"),
        }
    }
}

impl From<NodeId> for Content<'_> {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl<'a> From<(&'a Document, NodeId)> for Content<'a> {
    fn from((doc, id): (&'a Document, NodeId)) -> Self {
        Self::Foreign(doc, id)
    }
}

/// The root of another document.
impl<'a> From<&'a Document> for Content<'a> {
    fn from(doc: &'a Document) -> Self {
        Self::Foreign(doc, doc.root())
    }
}

impl<'a> From<NodeRef<'a>> for Content<'a> {
    fn from(node: NodeRef<'a>) -> Self {
        match node {
            NodeRef::Arena(doc, id) => Self::Foreign(doc, id),
            NodeRef::Json(value) => Self::Json(Cow::Borrowed(value)),
            NodeRef::Scalar(scalar) => Self::Scalar(scalar.clone()),
        }
    }
}

impl From<Value> for Content<'_> {
    fn from(value: Value) -> Self {
        Self::Json(Cow::Owned(value))
    }
}

impl<'a> From<&'a Value> for Content<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Json(Cow::Borrowed(value))
    }
}

impl From<Scalar> for Content<'_> {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

macro_rules! content_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Content<'_> {
                fn from(value: $ty) -> Self {
                    Self::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

content_from_scalar!(
    bool,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    String,
    char,
    NaiveDateTime,
    NaiveDate,
    Uuid,
);

impl From<&str> for Content<'_> {
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::from(value))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Content<'_>
where
    Tz::Offset: fmt::Display,
{
    fn from(value: DateTime<Tz>) -> Self {
        Self::Scalar(Scalar::from(value))
    }
}

impl<'a, T: Into<Content<'a>>> From<Option<T>> for Content<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<'a, T: Into<Content<'a>>> From<Vec<T>> for Content<'a> {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items.into_iter().map(Into::into).collect())
    }
}

impl<'a, T: Into<Content<'a>>, const N: usize> From<[T; N]> for Content<'a> {
    fn from(items: [T; N]) -> Self {
        Self::Many(items.into_iter().map(Into::into).collect())
    }
}

impl<'a, T: Clone + Into<Content<'a>>> From<&[T]> for Content<'a> {
    fn from(items: &[T]) -> Self {
        Self::Many(items.iter().cloned().map(Into::into).collect())
    }
}

impl Document {
    /// Rejects content that cannot be merged, before anything is mutated.
    pub(crate) fn validate_content(&self, content: &Content<'_>) -> MergeResult<()> {
        match content {
            Content::Node(id) if !self.contains(*id) => Err(MergeError::UnknownNode(*id)),
            Content::Foreign(doc, id) if !doc.contains(*id) => Err(MergeError::UnknownNode(*id)),
            Content::Unsupported(name) => Err(MergeError::InvalidContentType { type_name: *name }),
            Content::Many(items) => items.iter().try_for_each(|item| self.validate_content(item)),
            _ => Ok(()),
        }
    }

    /// Read-only view of single-node content. `None` for sequences.
    pub(crate) fn view<'s>(&'s self, content: &'s Content<'_>) -> Option<NodeRef<'s>> {
        match content {
            Content::Null => Some(NodeRef::null()),
            Content::Node(id) => self.node_ref(*id),
            Content::Foreign(doc, id) => doc.node_ref(*id),
            Content::Json(value) => Some(NodeRef::Json(value.as_ref())),
            Content::Scalar(scalar) => Some(NodeRef::Scalar(scalar)),
            Content::Many(_) | Content::Unsupported(_) => None,
        }
    }

    pub(crate) fn content_kind(&self, content: &Content<'_>) -> Option<NodeKind> {
        self.view(content).map(|node| node.kind())
    }

    /// Whether the content is absent or resolves to JSON null.
    pub(crate) fn content_is_null(&self, content: &Content<'_>) -> bool {
        self.view(content).is_some_and(|node| node.is_null())
    }

    /// Properties of object content, as contents of their own.
    pub(crate) fn content_entries<'c>(
        &self,
        content: &'c Content<'_>,
    ) -> Option<Vec<(String, Content<'c>)>> {
        match content {
            Content::Node(id) => match self.data(*id)? {
                NodeData::Object(map) => {
                    Some(map.iter().map(|(key, child)| (key.clone(), Content::Node(*child))).collect())
                },
                NodeData::Array(_) | NodeData::Value(_) => None,
            },
            Content::Foreign(doc, id) => {
                let doc: &'c Document = doc;
                match doc.data(*id)? {
                    NodeData::Object(map) => Some(
                        map.iter()
                            .map(|(key, child)| (key.clone(), Content::Foreign(doc, *child)))
                            .collect(),
                    ),
                    NodeData::Array(_) | NodeData::Value(_) => None,
                }
            },
            Content::Json(value) => match value.as_ref() {
                Value::Object(map) => Some(
                    map.iter()
                        .map(|(key, child)| (key.clone(), Content::Json(Cow::Borrowed(child))))
                        .collect(),
                ),
                _ => None,
            },
            Content::Null | Content::Scalar(_) | Content::Many(_) | Content::Unsupported(_) => {
                None
            },
        }
    }

    /// Items of array content or of a sequence.
    pub(crate) fn content_elements<'c>(&self, content: &'c Content<'_>) -> Option<Vec<Content<'c>>> {
        match content {
            Content::Node(id) => match self.data(*id)? {
                NodeData::Array(items) => Some(items.iter().map(|child| Content::Node(*child)).collect()),
                NodeData::Object(_) | NodeData::Value(_) => None,
            },
            Content::Foreign(doc, id) => {
                let doc: &'c Document = doc;
                match doc.data(*id)? {
                    NodeData::Array(items) => {
                        Some(items.iter().map(|child| Content::Foreign(doc, *child)).collect())
                    },
                    NodeData::Object(_) | NodeData::Value(_) => None,
                }
            },
            Content::Json(value) => match value.as_ref() {
                Value::Array(items) => {
                    Some(items.iter().map(|item| Content::Json(Cow::Borrowed(item))).collect())
                },
                _ => None,
            },
            Content::Many(items) => Some(items.iter().map(Content::reborrow).collect()),
            Content::Null | Content::Scalar(_) | Content::Unsupported(_) => None,
        }
    }

    /// Creates a fresh detached node holding a copy of `content`.
    pub(crate) fn materialize(&mut self, content: &Content<'_>) -> MergeResult<NodeId> {
        match content {
            Content::Null => Ok(self.create_value(Scalar::Null)),
            Content::Node(id) => self.deep_clone(*id),
            Content::Foreign(doc, id) => {
                let node = doc.node_ref(*id).ok_or(MergeError::UnknownNode(*id))?;
                Ok(self.import(node))
            },
            Content::Json(value) => Ok(self.import(NodeRef::Json(value.as_ref()))),
            Content::Scalar(scalar) => Ok(self.create_value(scalar.clone())),
            Content::Many(items) => {
                let array = self.create_array();
                for item in items {
                    let node = self.materialize(item)?;
                    self.push(array, node)?;
                }
                Ok(array)
            },
            Content::Unsupported(name) => Err(MergeError::InvalidContentType { type_name: *name }),
        }
    }
}
