use super::{Content, MergeSettings, NullValueHandling, PropertyNameComparison};
use crate::{Document, MergeResult, NodeId};
use tracing::trace;

impl Document {
    /// Merges the properties of object content into the object `target`.
    /// Content that is not an object leaves the target unchanged.
    pub(crate) fn merge_object(
        &mut self,
        target: NodeId,
        content: &Content<'_>,
        settings: &MergeSettings,
    ) -> MergeResult<()> {
        let Some(entries) = self.content_entries(content) else {
            trace!("Ignoring {} for object {}: not an object", content, target);
            return Ok(());
        };

        for (name, value) in entries {
            let Some((key, existing)) =
                self.find_property(target, &name, settings.property_name_comparison)
            else {
                let node = self.materialize(&value)?;
                self.set_property(target, name, node)?;
                continue;
            };

            let source_is_null = self.content_is_null(&value);
            let existing_kind = self.kind(existing);
            let same_container = existing_kind.is_some_and(|kind| kind.is_container())
                && existing_kind == self.content_kind(&value);

            if same_container && !source_is_null {
                self.merge_item(existing, &value, settings)?;
            } else if source_is_null && settings.null_value_handling == NullValueHandling::Ignore {
                trace!("Keeping '{}' of {}: incoming value is null", key, target);
            } else {
                let node = self.materialize(&value)?;
                self.set_property(target, key, node)?;
            }
        }

        Ok(())
    }

    /// Finds the property of `object` matching `name`, returning the key as
    /// spelled in the object. An exact match always wins.
    pub(crate) fn find_property(
        &self,
        object: NodeId,
        name: &str,
        comparison: PropertyNameComparison,
    ) -> Option<(String, NodeId)> {
        if let Some(id) = self.get(object, name) {
            return Some((name.to_string(), id));
        }
        match comparison {
            PropertyNameComparison::Exact => None,
            PropertyNameComparison::CaseInsensitive => self
                .entries(object)
                .find(|(key, _)| comparison.matches(key, name))
                .map(|(key, id)| (key.to_string(), id)),
        }
    }
}
