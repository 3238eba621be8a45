use super::Content;
use crate::document::Slot;
use crate::{Document, MergeResult, NodeId};
use tracing::trace;

impl Document {
    /// Replaces the scalar leaf `target` with a copy of `content`, through the
    /// slot its parent holds it in.
    ///
    /// Null content never overwrites a value, a sequence has no single value
    /// to take, and a scalar without a parent has no slot to write to; all
    /// three leave the document unchanged.
    pub(crate) fn merge_value(&mut self, target: NodeId, content: &Content<'_>) -> MergeResult<()> {
        if matches!(content, Content::Many(_)) || self.content_is_null(content) {
            trace!("Keeping value {}: nothing to take from {}", target, content);
            return Ok(());
        }
        let Some(link) = self.parent(target).cloned() else {
            trace!("Keeping value {}: it has no parent", target);
            return Ok(());
        };

        let node = self.materialize(content)?;
        match link.slot {
            Slot::Property(key) => self.set_property(link.container, key, node)?,
            Slot::Index(index) => self.set_index(link.container, index, node)?,
        };
        Ok(())
    }
}
