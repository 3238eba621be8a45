use super::{ArrayHandling, Content, MergeSettings};
use crate::document::NodeRef;
use crate::{Document, MergeResult, NodeId};
use std::collections::HashSet;
use tracing::trace;

impl Document {
    /// Merges array content (or a sequence) into the array `target`.
    /// Any other content leaves the target unchanged.
    pub(crate) fn merge_array(
        &mut self,
        target: NodeId,
        content: &Content<'_>,
        settings: &MergeSettings,
    ) -> MergeResult<()> {
        // Snapshot of the source items, taken before the target is touched.
        let Some(source) = self.content_elements(content) else {
            trace!("Ignoring {} for array {}: not an array", content, target);
            return Ok(());
        };

        match settings.array_handling {
            ArrayHandling::Concat => self.append_all(target, &source),
            ArrayHandling::Union => self.append_unique(target, &source),
            ArrayHandling::Replace => {
                if content.is_same_node(target) {
                    return Ok(());
                }
                self.clear(target)?;
                self.append_all(target, &source)
            },
            ArrayHandling::Merge => self.merge_positional(target, &source, settings),
        }
    }

    fn append_all(&mut self, target: NodeId, items: &[Content<'_>]) -> MergeResult<()> {
        for item in items {
            let node = self.materialize(item)?;
            self.push(target, node)?;
        }
        Ok(())
    }

    /// Appends the items not deep-equal to an element already in `target`
    /// or to an item appended earlier in the same call.
    fn append_unique(&mut self, target: NodeId, items: &[Content<'_>]) -> MergeResult<()> {
        // Nested sequences have no view until they are nodes.
        let items = items
            .iter()
            .map(|item| match item {
                Content::Many(_) => self.materialize(item).map(Content::Node),
                other => Ok(other.reborrow()),
            })
            .collect::<MergeResult<Vec<_>>>()?;

        let accepted: Vec<usize> = {
            let mut seen: HashSet<NodeRef<'_>> =
                self.elements(target).iter().map(|id| NodeRef::Arena(self, *id)).collect();
            items
                .iter()
                .enumerate()
                .filter_map(|(index, item)| {
                    let view = self.view(item)?;
                    seen.insert(view).then_some(index)
                })
                .collect()
        };

        trace!("Union adds {} of {} items to {}", accepted.len(), items.len(), target);
        for index in accepted {
            let node = self.materialize(&items[index])?;
            self.push(target, node)?;
        }
        Ok(())
    }

    /// Merges item `i` into element `i` of `target`, appending items past
    /// the end. Elements past the last item are kept.
    fn merge_positional(
        &mut self,
        target: NodeId,
        items: &[Content<'_>],
        settings: &MergeSettings,
    ) -> MergeResult<()> {
        for (index, item) in items.iter().enumerate() {
            match self.index(target, index) {
                Some(existing) if self.is_container(existing) => {
                    self.merge_item(existing, item, settings)?;
                },
                Some(existing) => self.merge_value(existing, item)?,
                None => {
                    let node = self.materialize(item)?;
                    self.push(target, node)?;
                },
            }
        }
        Ok(())
    }
}
