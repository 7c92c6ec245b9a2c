//! Hit testing, collection and hook dispatch.

use std::future::Future;

use arbor_core::{Point, Rect};

use crate::action::Action;
use crate::env::Environment;
use crate::error::{ActionError, ViewResult};
use crate::node::{NodeFlags, Priority, ViewNode};
use crate::task::TaskQueue;
use crate::tree::{NodeId, ViewTree};
use crate::view::View;

/// Attribute-equality test applied by `find` and `find_all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Takes input.
    Interactive(bool),
    /// Ignores input.
    Disabled(bool),
    /// Holds focus.
    Focused(bool),
    /// Resolution priority.
    Priority(Priority),
    /// View type name.
    TypeName(String),
    /// View id (`"Type-index"`).
    ViewId(String),
}

impl Filter {
    /// Filters selecting nodes that can take input right now.
    #[must_use]
    pub fn enabled_interactive() -> [Self; 2] {
        [Self::Interactive(true), Self::Disabled(false)]
    }

    /// Returns true if `node` satisfies this filter.
    #[must_use]
    pub fn matches(&self, node: &ViewNode) -> bool {
        match self {
            Self::Interactive(on) => node.is_interactive() == *on,
            Self::Disabled(on) => node.is_disabled() == *on,
            Self::Focused(on) => node.is_focused() == *on,
            Self::Priority(priority) => node.priority_level() == *priority,
            Self::TypeName(name) => node.type_name() == name.as_str(),
            Self::ViewId(id) => node.id() == *id,
        }
    }
}

fn matches_all(node: &ViewNode, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| filter.matches(node))
}

/// Mutable context handed to event hooks.
pub struct EventCx<'a> {
    node: NodeId,
    frame: Rect,
    inner: Rect,
    env: &'a Environment,
    disabled: bool,
    tasks: &'a mut TaskQueue,
}

impl EventCx<'_> {
    /// The node receiving the event.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The node's frame.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// The node's frame minus padding and border.
    #[must_use]
    pub fn inner(&self) -> Rect {
        self.inner
    }

    /// The node's environment.
    #[must_use]
    pub fn env(&self) -> &Environment {
        self.env
    }

    /// Whether the node is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Fires `action` on behalf of this node.
    pub fn fire(&mut self, action: &Action) {
        action.fire(self.node, self.tasks);
    }

    /// Detaches `task`, owned by this node.
    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = Result<(), ActionError>> + 'static,
    {
        self.tasks.spawn(self.node, task);
    }
}

impl ViewTree {
    /// Innermost, frontmost node under `point` matching every filter.
    ///
    /// A node whose frame excludes the point is pruned with its subtree.
    /// Subviews are tested before the node itself, later siblings first.
    #[must_use]
    pub fn find(&self, id: NodeId, point: Point, filters: &[Filter]) -> Option<NodeId> {
        let node = self.get(id)?;
        if !node.frame().contains(point) {
            return None;
        }
        node.subviews()
            .iter()
            .rev()
            .find_map(|child| self.find(*child, point, filters))
            .or_else(|| matches_all(node, filters).then_some(id))
    }

    /// Every node in the subtree at `id` matching every filter, ancestors
    /// before descendants.
    #[must_use]
    pub fn find_all(&self, id: NodeId, filters: &[Filter]) -> Vec<NodeId> {
        self.iter_dfs(id)
            .filter(|node| self.get(*node).is_some_and(|n| matches_all(n, filters)))
            .collect()
    }

    /// Runs `hook` against the view of `id` with an event context.
    pub fn with_view<R>(
        &mut self,
        id: NodeId,
        tasks: &mut TaskQueue,
        hook: impl FnOnce(&mut dyn View, &mut EventCx<'_>) -> R,
    ) -> ViewResult<R> {
        let node = self.node_mut(id)?;
        let inner = node.inner();
        let ViewNode { view, state, .. } = node;
        let mut cx = EventCx {
            node: id,
            frame: state.frame,
            inner,
            env: &state.env,
            disabled: state.flags.has(NodeFlags::DISABLED),
            tasks,
        };
        Ok(hook(view.as_mut(), &mut cx))
    }

    pub(crate) fn set_focused_flag(&mut self, id: NodeId, focused: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.state.flags.assign(NodeFlags::FOCUSED, focused);
        }
    }
}
