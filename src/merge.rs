#![allow(clippy::self_named_module_files)]

//! Deep merge of content into a document node.
//!
//! [`Document::merge_with`] validates the content once, then dispatches on the
//! kind of the target node. Objects merge property by property, arrays follow
//! [`ArrayHandling`], and scalar leaves are swapped out through their parent
//! link. Anything inserted into the target is a fresh copy, so the source is
//! never aliased.

use crate::document::NodeKind;
use crate::{Document, MergeError, MergeResult, NodeId};
use tracing::{debug, trace};

mod array;
mod content;
mod object;
pub mod settings;
mod value;

pub use content::{Content, ContentClass};
pub use settings::{ArrayHandling, MergeSettings, NullValueHandling, PropertyNameComparison};

impl Document {
    /// Merges `content` into `target` with default settings.
    ///
    /// # Errors
    ///
    /// See [`Document::merge_with`].
    pub fn merge<'a>(&mut self, target: NodeId, content: impl Into<Content<'a>>) -> MergeResult<()> {
        self.merge_with(target, content, &MergeSettings::default())
    }

    /// Merges `content` into `target` in place.
    ///
    /// Absent content, and content that is `target` itself, leave the
    /// document unchanged.
    ///
    /// Values that a merge overwrites, clears or replaces stay in the arena
    /// as detached nodes. Long-lived documents that merge repeatedly should
    /// call [`Document::compact`] now and then, keeping in mind that it
    /// invalidates every previously issued [`NodeId`].
    ///
    /// # Errors
    ///
    /// Returns an error, before anything is modified, if:
    /// - the content (or an item of a sequence) has no JSON mapping
    /// - `target` or a content node does not belong to its document
    pub fn merge_with<'a>(
        &mut self,
        target: NodeId,
        content: impl Into<Content<'a>>,
        settings: &MergeSettings,
    ) -> MergeResult<()> {
        let content = content.into();
        if matches!(content, Content::Null) {
            trace!("Nothing to merge into {}", target);
            return Ok(());
        }

        self.validate_content(&content)?;
        let kind = self.kind(target).ok_or(MergeError::UnknownNode(target))?;

        debug!("Merging {} into {} {} ({})", content, kind, target, settings);
        self.merge_item(target, &content, settings)
    }

    /// Dispatches one merge step on the kind of `target`.
    pub(crate) fn merge_item(
        &mut self,
        target: NodeId,
        content: &Content<'_>,
        settings: &MergeSettings,
    ) -> MergeResult<()> {
        if content.is_same_node(target) {
            trace!("Skipping merge of {} into itself", target);
            return Ok(());
        }

        match self.kind(target).ok_or(MergeError::UnknownNode(target))? {
            NodeKind::Object => self.merge_object(target, content, settings),
            NodeKind::Array => self.merge_array(target, content, settings),
            NodeKind::Value => self.merge_value(target, content),
        }
    }
}
