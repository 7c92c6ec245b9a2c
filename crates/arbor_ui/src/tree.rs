//! View tree for hierarchical UI management.
//!
//! The tree owns every live node in an arena keyed by `NodeId`. Children
//! are owned exclusively through their parent's `subviews` list; the
//! `parent` link is a plain id, never an owning reference.

use std::collections::HashMap;
use std::fmt::{self, Write as _};

use crossbeam_channel::{Receiver, Sender};

use crate::env::Environment;
use crate::error::{ViewError, ViewResult};
use crate::invalidate::Invalidation;
use crate::node::{NodeFlags, ViewNode};

/// Arena key of a live node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Creates a new node ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Counters for the engine's passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Completed reconciliations.
    pub reconciliations: u64,
    /// Completed `layout` calls.
    pub layouts: u64,
    /// Nodes attached over the tree's lifetime.
    pub nodes_attached: u64,
    /// Nodes discarded over the tree's lifetime.
    pub nodes_discarded: u64,
}

/// Child lookup key: sibling index or view id.
#[derive(Debug, Clone, Copy)]
pub enum ChildKey<'a> {
    /// Position among siblings.
    Index(usize),
    /// View id such as `"Text-2"`.
    Id(&'a str),
}

impl From<usize> for ChildKey<'_> {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl<'a> From<&'a str> for ChildKey<'a> {
    fn from(id: &'a str) -> Self {
        Self::Id(id)
    }
}

/// Manages the view hierarchy.
pub struct ViewTree {
    /// Live nodes indexed by ID.
    pub(crate) nodes: HashMap<NodeId, ViewNode>,
    /// The root node.
    root: NodeId,
    /// ID counter for generating unique IDs.
    next_id: u64,
    /// Environment the root inherits from.
    base_env: Environment,
    /// Bound values push here; drained by `process_invalidations`.
    pub(crate) invalidation_tx: Sender<Invalidation>,
    pub(crate) invalidation_rx: Receiver<Invalidation>,
    pub(crate) stats: TreeStats,
}

impl ViewTree {
    /// Creates a tree rooted at `root` using the default environment.
    #[must_use]
    pub fn new(root: ViewNode) -> Self {
        Self::with_environment(root, Environment::default())
    }

    /// Creates a tree rooted at `root`, inheriting from `env`.
    ///
    /// The root starts dirty and unreconciled; the first `layout` builds it.
    #[must_use]
    pub fn with_environment(root: ViewNode, env: Environment) -> Self {
        let (invalidation_tx, invalidation_rx) = crossbeam_channel::unbounded();
        let mut tree = Self {
            nodes: HashMap::with_capacity(256),
            root: NodeId::new(0),
            next_id: 1,
            base_env: env,
            invalidation_tx,
            invalidation_rx,
            stats: TreeStats::default(),
        };
        let env = tree.base_env.inherit(&root.config.env);
        let id = tree.attach(root, None, 0, env);
        tree.root = id;
        tree.mark_dirty();
        tree
    }

    /// Generates a new unique node ID.
    pub(crate) fn next_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Inserts a single node with its live state initialized.
    pub(crate) fn attach(
        &mut self,
        mut node: ViewNode,
        parent: Option<NodeId>,
        index: usize,
        env: Environment,
    ) -> NodeId {
        let id = self.next_id();
        let scale = env.scale();
        let state = &mut node.state;
        state.parent = parent;
        state.index = index;
        state.subviews.clear();
        state.padding = node.config.padding.scale(scale).clamped();
        state.border = node.config.border.scale(scale).clamped();
        state.env = env;
        state.flags = NodeFlags::default();
        state.flags.assign(NodeFlags::DISABLED, node.config.disabled);
        state.flags.assign(NodeFlags::INTERACTIVE, node.view.interactive());
        state.subscriptions = node
            .bindings
            .iter()
            .map(|slot| slot.attach(id, self.invalidation_tx.clone()))
            .collect();
        self.nodes.insert(id, node);
        self.stats.nodes_attached += 1;
        id
    }

    /// Removes a node and all its descendants, recording their ids.
    ///
    /// Does not touch the parent's `subviews`; callers replace that list.
    pub(crate) fn remove_subtree(&mut self, id: NodeId, removed: &mut Vec<NodeId>) {
        if let Some(node) = self.nodes.remove(&id) {
            for child in node.state.subviews.iter().copied() {
                self.remove_subtree(child, removed);
            }
            removed.push(id);
            self.stats.nodes_discarded += 1;
        }
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Gets a node by ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&ViewNode> {
        self.nodes.get(&id)
    }

    /// Gets a node, or `UnknownNode`.
    pub fn node(&self, id: NodeId) -> ViewResult<&ViewNode> {
        self.nodes.get(&id).ok_or(ViewError::UnknownNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> ViewResult<&mut ViewNode> {
        self.nodes.get_mut(&id).ok_or(ViewError::UnknownNode(id))
    }

    /// Returns true if `id` is live.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the live children of a node.
    #[must_use]
    pub fn subviews(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map_or(&[], |node| node.state.subviews.as_slice())
    }

    /// Returns the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|node| node.state.parent)
    }

    /// Walks parent links up to the topmost ancestor.
    #[must_use]
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Looks up a child by sibling index or view id.
    #[must_use]
    pub fn child<'a>(&self, id: NodeId, key: impl Into<ChildKey<'a>>) -> Option<NodeId> {
        let subviews = self.subviews(id);
        match key.into() {
            ChildKey::Index(index) => subviews.get(index).copied(),
            ChildKey::Id(view_id) => subviews
                .iter()
                .copied()
                .find(|child| self.nodes.get(child).is_some_and(|n| n.id() == view_id)),
        }
    }

    /// View ids from the root down to `id`.
    #[must_use]
    pub fn id_path(&self, id: NodeId) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.nodes.get(&node_id) else {
                break;
            };
            path.push(node.id());
            current = node.state.parent;
        }
        path.reverse();
        path
    }

    /// Resolves an id path from the root. Any segment that does not match
    /// yields `None`.
    #[must_use]
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Option<NodeId> {
        let (first, rest) = path.split_first()?;
        let root = self.nodes.get(&self.root)?;
        if root.id() != first.as_ref() {
            return None;
        }
        rest.iter()
            .try_fold(self.root, |node, part| self.child(node, ChildKey::Id(part.as_ref())))
    }

    /// Returns all node IDs below and including `id` in depth-first order.
    pub fn iter_dfs(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        NodeDfsIterator {
            tree: self,
            stack: if self.contains(id) { vec![id] } else { Vec::new() },
        }
    }

    /// Whether the root needs a layout pass.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.nodes
            .get(&self.root)
            .is_some_and(ViewNode::is_dirty)
    }

    /// Marks the root for re-layout.
    pub fn mark_dirty(&mut self) {
        if let Some(root) = self.nodes.get_mut(&self.root) {
            root.state.flags.set(NodeFlags::DIRTY);
        }
    }

    /// Pass counters.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    /// Indented outline of the subtree at `id`: one `id frame` line per node.
    #[must_use]
    pub fn dump(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.dump_into(id, 0, &mut out);
        out
    }

    fn dump_into(&self, id: NodeId, level: usize, out: &mut String) {
        if let Some(node) = self.nodes.get(&id) {
            let _ = writeln!(out, "{}{} {}", "  ".repeat(level), node.id(), node.frame());
            for child in &node.state.subviews {
                self.dump_into(*child, level + 1, out);
            }
        }
    }
}

impl fmt::Debug for ViewTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewTree")
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Depth-first iterator over the view tree.
struct NodeDfsIterator<'a> {
    tree: &'a ViewTree,
    stack: Vec<NodeId>,
}

impl Iterator for NodeDfsIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;

        // Push children in reverse order so they're processed left-to-right
        self.stack.extend(self.tree.subviews(id).iter().rev().copied());

        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Group, Leaf};
    use arbor_core::Size;

    fn sample() -> ViewTree {
        let root = ViewNode::new(Group).children([
            ViewNode::new(Leaf::new(Size::new(1, 1))),
            ViewNode::new(Group).child(ViewNode::new(Leaf::new(Size::new(2, 2)))),
        ]);
        let mut tree = ViewTree::new(root);
        let root = tree.root();
        tree.rebuild(root).unwrap();
        tree
    }

    #[test]
    fn test_tree_hierarchy() {
        let tree = sample();
        let root = tree.root();

        assert_eq!(tree.subviews(root).len(), 2);
        assert_eq!(tree.len(), 4);
        let group = tree.child(root, 1).unwrap();
        assert_eq!(tree.parent(group), Some(root));
        assert_eq!(tree.node(group).unwrap().index(), 1);
    }

    #[test]
    fn test_id_path_and_resolve_round_trip() {
        let tree = sample();
        let root = tree.root();
        let leaf = tree.child(tree.child(root, "Group-1").unwrap(), 0).unwrap();

        let path = tree.id_path(leaf);
        assert_eq!(path, vec!["Group-0", "Group-1", "Leaf-0"]);
        assert_eq!(tree.resolve(&path), Some(leaf));
        assert_eq!(tree.root_of(leaf), root);
    }

    #[test]
    fn test_resolve_misses_are_none() {
        let tree = sample();

        assert_eq!(tree.resolve::<&str>(&[]), None);
        assert_eq!(tree.resolve(&["Other-0"]), None);
        assert_eq!(tree.resolve(&["Group-0", "Leaf-9"]), None);
        assert_eq!(tree.resolve(&["Group-0", "Leaf-0", "Leaf-0"]), None);
    }

    #[test]
    fn test_iter_dfs_is_pre_order() {
        let tree = sample();
        let ids: Vec<String> = tree
            .iter_dfs(tree.root())
            .map(|id| tree.node(id).unwrap().id())
            .collect();

        assert_eq!(ids, vec!["Group-0", "Leaf-0", "Group-1", "Leaf-0"]);
    }

    #[test]
    fn test_dump_lists_every_node() {
        let tree = sample();
        let dump = tree.dump(tree.root());

        assert_eq!(dump.lines().count(), 4);
        assert!(dump.starts_with("Group-0"));
        assert!(dump.contains("\n    Leaf-0"));
    }
}
