//! Invalidation bridge between bound values and the tree.
//!
//! A bound value's subscription only enqueues; the tree applies queued
//! invalidations on its own thread, so a mutation made from an event
//! handler or a detached task is reconciled before the next layout reads
//! the tree.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::ViewResult;
use crate::tree::{NodeId, ViewTree};

/// A change to a value bound on `node`.
#[derive(Clone)]
pub struct Invalidation {
    /// Owning node.
    pub node: NodeId,
    /// Name the binding was declared with.
    pub name: Arc<str>,
    /// The new value.
    pub value: Arc<dyn Any + Send + Sync>,
}

impl fmt::Debug for Invalidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invalidation")
            .field("node", &self.node)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl ViewTree {
    /// Notifies `id` that its bound `name` now holds `value`.
    ///
    /// Calls the node's `state_changed` hook, rebuilds its subtree and marks
    /// the root dirty. Returns the discarded node ids.
    pub fn state_changed(
        &mut self,
        id: NodeId,
        name: &str,
        value: &(dyn Any + Send + Sync),
    ) -> ViewResult<Vec<NodeId>> {
        self.node_mut(id)?.view.state_changed(name, value);
        let discarded = self.rebuild(id)?;
        self.mark_dirty();
        tracing::debug!(node = %id, name, "state changed");
        Ok(discarded)
    }

    /// Applies every queued invalidation in arrival order.
    ///
    /// Entries whose node was discarded, including by an earlier entry in
    /// the same drain, are skipped. Returns all discarded node ids.
    pub fn process_invalidations(&mut self) -> ViewResult<Vec<NodeId>> {
        let mut discarded = Vec::new();
        while let Ok(invalidation) = self.invalidation_rx.try_recv() {
            if !self.contains(invalidation.node) {
                tracing::trace!(node = %invalidation.node, "skipping invalidation for discarded node");
                continue;
            }
            discarded.extend(self.state_changed(
                invalidation.node,
                &invalidation.name,
                invalidation.value.as_ref(),
            )?);
        }
        Ok(discarded)
    }

    /// Number of invalidations waiting to be applied.
    #[must_use]
    pub fn pending_invalidations(&self) -> usize {
        self.invalidation_rx.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ViewNode;
    use crate::testing::{Group, Recorder};
    use arbor_core::{Binding, Rect};

    #[test]
    fn test_round_trip() {
        let value = Binding::new(1_i32);
        let recorder = Recorder::default();
        let root = ViewNode::new(Group).child(ViewNode::new(recorder.clone()).bind("value", &value));
        let mut tree = ViewTree::new(root);
        let root = tree.root();
        tree.layout(root, Rect::new(0, 0, 10, 10)).unwrap();
        assert!(!tree.is_dirty());

        value.set(2);
        assert_eq!(tree.pending_invalidations(), 1);
        tree.process_invalidations().unwrap();

        assert_eq!(recorder.changes(), vec![("value".to_owned(), Some(2))]);
        assert_eq!(tree.stats().reconciliations, 2);
        assert!(tree.is_dirty());

        tree.layout(root, Rect::new(0, 0, 10, 10)).unwrap();
        assert!(!tree.is_dirty());
    }

    #[test]
    fn test_unchanged_value_does_not_invalidate() {
        let value = Binding::new(5_i32);
        let root = ViewNode::new(Group).bind("value", &value);
        let mut tree = ViewTree::new(root);

        value.set(5);
        assert_eq!(tree.process_invalidations().unwrap(), Vec::new());
        assert_eq!(tree.stats().reconciliations, 0);
    }

    #[test]
    fn test_discarded_owner_is_skipped() {
        let outer = Binding::new(0_i32);
        let inner = Binding::new(0_i32);
        let recorder = Recorder::default();
        let root = ViewNode::new(Group)
            .bind("outer", &outer)
            .child(ViewNode::new(recorder.clone()).bind("inner", &inner));
        let mut tree = ViewTree::new(root);
        let root = tree.root();
        tree.rebuild(root).unwrap();
        let old_recorder = tree.subviews(root)[0];

        // Queue both before draining: the root rebuild discards the recorder
        // that owned the second entry.
        outer.set(1);
        inner.set(1);
        let discarded = tree.process_invalidations().unwrap();

        assert!(discarded.contains(&old_recorder));
        assert!(recorder.changes().is_empty());
    }
}
