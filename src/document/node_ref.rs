use super::{Document, NodeData, NodeId, NodeKind, Scalar, ScalarRef};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

static NULL: Scalar = Scalar::Null;
static MISSING: NodeData = NodeData::Value(Scalar::Null);

/// Read-only view of a JSON node, wherever it is stored.
///
/// Equality and hashing on `NodeRef` are structural (see
/// [`equality`](super::equality)); identity of arena nodes is `NodeId`
/// equality and is never implied by `==` here.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    /// A node owned by a [`Document`].
    Arena(&'a Document, NodeId),
    /// A node of a `serde_json` tree.
    Json(&'a Value),
    /// A bare scalar that is not stored in any tree.
    Scalar(&'a Scalar),
}

impl<'a> NodeRef<'a> {
    /// View of a JSON null that lives nowhere.
    #[must_use]
    pub fn null() -> Self {
        Self::Scalar(&NULL)
    }

    fn arena_data(doc: &'a Document, id: NodeId) -> &'a NodeData {
        doc.data(id).unwrap_or(&MISSING)
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Arena(doc, id) => Self::arena_data(doc, *id).kind(),
            Self::Json(Value::Object(_)) => NodeKind::Object,
            Self::Json(Value::Array(_)) => NodeKind::Array,
            Self::Json(_) | Self::Scalar(_) => NodeKind::Value,
        }
    }

    /// The scalar payload, `None` for containers.
    #[must_use]
    pub fn scalar(&self) -> Option<ScalarRef<'a>> {
        match *self {
            Self::Arena(doc, id) => match Self::arena_data(doc, id) {
                NodeData::Value(scalar) => Some(scalar.as_scalar_ref()),
                NodeData::Object(_) | NodeData::Array(_) => None,
            },
            Self::Json(value) => ScalarRef::from_json(value),
            Self::Scalar(scalar) => Some(scalar.as_scalar_ref()),
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self.scalar(), Some(ScalarRef::Null))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match *self {
            Self::Arena(doc, id) => doc.len(id),
            Self::Json(Value::Object(map)) => map.len(),
            Self::Json(Value::Array(items)) => items.len(),
            Self::Json(_) | Self::Scalar(_) => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Property lookup by exact name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Self> {
        match *self {
            Self::Arena(doc, id) => doc.get(id, key).map(|child| Self::Arena(doc, child)),
            Self::Json(Value::Object(map)) => map.get(key).map(Self::Json),
            Self::Json(_) | Self::Scalar(_) => None,
        }
    }

    /// Object properties in insertion order; empty for other kinds.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'a str, Self)> {
        match *self {
            Self::Arena(doc, id) => match Self::arena_data(doc, id) {
                NodeData::Object(map) => {
                    map.iter().map(|(key, child)| (key.as_str(), Self::Arena(doc, *child))).collect()
                },
                NodeData::Array(_) | NodeData::Value(_) => Vec::new(),
            },
            Self::Json(Value::Object(map)) => {
                map.iter().map(|(key, child)| (key.as_str(), Self::Json(child))).collect()
            },
            Self::Json(_) | Self::Scalar(_) => Vec::new(),
        }
    }

    /// Array elements in order; empty for other kinds.
    #[must_use]
    pub fn elements(&self) -> Vec<Self> {
        match *self {
            Self::Arena(doc, id) => {
                doc.elements(id).iter().map(|child| Self::Arena(doc, *child)).collect()
            },
            Self::Json(Value::Array(items)) => items.iter().map(Self::Json).collect(),
            Self::Json(_) | Self::Scalar(_) => Vec::new(),
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        match self.kind() {
            NodeKind::Object => Value::Object(
                self.entries()
                    .into_iter()
                    .map(|(key, child)| (key.to_string(), child.to_value()))
                    .collect(),
            ),
            NodeKind::Array => {
                Value::Array(self.elements().iter().map(Self::to_value).collect())
            },
            NodeKind::Value => self.scalar().map_or(Value::Null, ScalarRef::to_json),
        }
    }
}

impl Serialize for NodeRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.kind() {
            NodeKind::Object => {
                let entries = self.entries();
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, child) in &entries {
                    map.serialize_entry(key, child)?;
                }
                map.end()
            },
            NodeKind::Array => {
                let items = self.elements();
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in &items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            },
            NodeKind::Value => match self.scalar().unwrap_or(ScalarRef::Null) {
                ScalarRef::Null => serializer.serialize_unit(),
                ScalarRef::Bool(b) => serializer.serialize_bool(b),
                ScalarRef::Number(n) => n.serialize(serializer),
                ScalarRef::String(s) => serializer.serialize_str(s),
            },
        }
    }
}
