//! Structural equality and hashing for JSON nodes.
//!
//! Two nodes are equal when they have the same kind and
//! - scalars: same scalar kind and value (`1` and `1.0` differ, as in `serde_json`),
//! - arrays: same length and pairwise equal elements in order,
//! - objects: same key set with equal values per key, in any order.
//!
//! The hash agrees with this equality, so [`NodeRef`] can key a `HashSet`.

use super::{NodeKind, NodeRef, ScalarRef};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Deep structural comparison of two nodes, possibly from different stores.
#[must_use]
pub fn deep_equals(left: NodeRef<'_>, right: NodeRef<'_>) -> bool {
    match (left.kind(), right.kind()) {
        (NodeKind::Value, NodeKind::Value) => left.scalar() == right.scalar(),
        (NodeKind::Array, NodeKind::Array) => {
            let (left_items, right_items) = (left.elements(), right.elements());
            left_items.len() == right_items.len()
                && left_items.iter().zip(&right_items).all(|(a, b)| deep_equals(*a, *b))
        },
        (NodeKind::Object, NodeKind::Object) => {
            left.len() == right.len()
                && left.entries().into_iter().all(|(key, value)| {
                    right.get(key).is_some_and(|other| deep_equals(value, other))
                })
        },
        _ => false,
    }
}

/// Hash of a node consistent with [`deep_equals`].
#[must_use]
pub fn deep_hash(node: NodeRef<'_>) -> u64 {
    let mut hasher = DefaultHasher::new();
    node.hash(&mut hasher);
    hasher.finish()
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        deep_equals(*self, *other)
    }
}

impl Eq for NodeRef<'_> {}

impl Hash for NodeRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.kind() {
            NodeKind::Value => {
                0u8.hash(state);
                hash_scalar(self.scalar().unwrap_or(ScalarRef::Null), state);
            },
            NodeKind::Array => {
                1u8.hash(state);
                let items = self.elements();
                items.len().hash(state);
                for item in &items {
                    item.hash(state);
                }
            },
            NodeKind::Object => {
                2u8.hash(state);
                let entries = self.entries();
                entries.len().hash(state);
                // Entry order must not matter, so entries are hashed alone and summed.
                let combined = entries.iter().fold(0u64, |acc, (key, value)| {
                    let mut entry = DefaultHasher::new();
                    key.hash(&mut entry);
                    value.hash(&mut entry);
                    acc.wrapping_add(entry.finish())
                });
                combined.hash(state);
            },
        }
    }
}

fn hash_scalar<H: Hasher>(scalar: ScalarRef<'_>, state: &mut H) {
    match scalar {
        ScalarRef::Null => 0u8.hash(state),
        ScalarRef::Bool(b) => {
            1u8.hash(state);
            b.hash(state);
        },
        ScalarRef::Number(n) => {
            2u8.hash(state);
            if let Some(u) = n.as_u64() {
                0u8.hash(state);
                u.hash(state);
            } else if let Some(i) = n.as_i64() {
                1u8.hash(state);
                i.hash(state);
            } else if let Some(f) = n.as_f64() {
                2u8.hash(state);
                // -0.0 + 0.0 is +0.0, and the two zeros compare equal.
                (f + 0.0).to_bits().hash(state);
            }
        },
        ScalarRef::String(s) => {
            3u8.hash(state);
            s.hash(state);
        },
    }
}
