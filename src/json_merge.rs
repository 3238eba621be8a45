//! Merging over plain `serde_json` trees.

use crate::merge::MergeSettings;
use crate::{Document, MergeResult};
use serde_json::Value;

/// Merges `overlay` into `target` with the same rules as [`Document::merge_with`].
///
/// A scalar `target` has no parent to be replaced through, so it is left
/// as it is, as is any part of `target` that `overlay` does not reach.
///
/// # Errors
///
/// This only fails if the merge itself reports an error, which does not
/// happen for `serde_json` input.
pub fn merge_values(target: &mut Value, overlay: &Value, settings: &MergeSettings) -> MergeResult<()> {
    let mut doc = Document::from_value(target);
    doc.merge_with(doc.root(), overlay, settings)?;
    *target = doc.root_value();
    Ok(())
}

/// Folds each overlay into `base` in order, later overlays winning.
///
/// # Errors
///
/// Propagates the first error reported by [`merge_values`].
pub fn merge_all<'a>(
    base: &Value,
    overlays: impl IntoIterator<Item = &'a Value>,
    settings: &MergeSettings,
) -> MergeResult<Value> {
    let mut doc = Document::from_value(base);
    for overlay in overlays {
        doc.merge_with(doc.root(), overlay, settings)?;
    }
    Ok(doc.root_value())
}
