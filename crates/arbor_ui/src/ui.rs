//! Frame driver.
//!
//! `Ui` sequences everything on one thread: detached tasks run, queued
//! invalidations rebuild their nodes, a dirty root is laid out again, and
//! only then is the tree drawn. Input is routed between frames.

use arbor_core::Rect;

use crate::env::Environment;
use crate::error::ViewResult;
use crate::input::Event;
use crate::node::ViewNode;
use crate::render::Renderer;
use crate::router::EventRouter;
use crate::task::TaskQueue;
use crate::tree::{NodeId, ViewTree};

/// A view tree bound to a viewport, a router and a task queue.
#[derive(Debug)]
pub struct Ui {
    tree: ViewTree,
    router: EventRouter,
    tasks: TaskQueue,
    viewport: Rect,
}

impl Ui {
    /// Creates a driver for `root` in `viewport` with the default environment.
    pub fn new(root: ViewNode, viewport: Rect) -> ViewResult<Self> {
        Self::with_environment(root, Environment::default(), viewport)
    }

    /// Creates a driver whose root inherits from `env`.
    pub fn with_environment(root: ViewNode, env: Environment, viewport: Rect) -> ViewResult<Self> {
        Ok(Self {
            tree: ViewTree::with_environment(root, env),
            router: EventRouter::new(),
            tasks: TaskQueue::new()?,
            viewport,
        })
    }

    /// The live tree.
    #[must_use]
    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    /// Rebuilds `id` from its declaration and marks the root for re-layout.
    ///
    /// Tasks owned by discarded nodes are aborted. Returns the discarded
    /// ids.
    pub fn rebuild(&mut self, id: NodeId) -> ViewResult<Vec<NodeId>> {
        let discarded = self.tree.rebuild(id)?;
        self.tree.mark_dirty();
        self.tasks.cancel_owned_by(&discarded);
        self.router.refresh_focus(&mut self.tree);
        Ok(discarded)
    }

    /// The detached task queue.
    #[must_use]
    pub fn tasks(&self) -> &TaskQueue {
        &self.tasks
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// The focused node.
    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.router.focused(&self.tree)
    }

    /// Changes the viewport; the next frame lays out again.
    pub fn resize(&mut self, viewport: Rect) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.tree.mark_dirty();
        }
    }

    /// Routes one input event. Returns true if a node received it.
    pub fn dispatch(&mut self, event: &Event) -> ViewResult<bool> {
        self.router.dispatch(&mut self.tree, &mut self.tasks, event)
    }

    /// Brings the tree up to date without drawing.
    ///
    /// Runs pending tasks, applies queued invalidations and lays out a
    /// dirty root. Tasks owned by discarded nodes are aborted, and the
    /// focus flag moves to the rebuilt node holding the focus path.
    pub fn sync(&mut self) -> ViewResult<()> {
        self.tasks.run_until_stalled();

        let discarded = self.tree.process_invalidations()?;
        self.tasks.cancel_owned_by(&discarded);

        if self.tree.is_dirty() {
            let root = self.tree.root();
            let discarded = self.tree.layout(root, self.viewport)?;
            self.tasks.cancel_owned_by(&discarded);
        }
        self.router.refresh_focus(&mut self.tree);
        Ok(())
    }

    /// Syncs, then draws the whole tree.
    pub fn frame(&mut self, renderer: &mut dyn Renderer) -> ViewResult<()> {
        self.sync()?;
        self.tree.render(self.tree.root(), renderer)
    }
}
