//! Pointer tracking and keyboard focus.
//!
//! The router never holds a `NodeId` across events. Focus and pointer
//! tracking are remembered as id-paths and resolved again on every event,
//! so they follow a node through a rebuild that reproduces the same path
//! and quietly lapse when it does not.

use crate::error::ViewResult;
use crate::event::{EventCx, Filter};
use crate::input::{Event, Key, Modifiers};
use crate::task::TaskQueue;
use crate::tree::{NodeId, ViewTree};
use crate::view::View;

/// Routes input events into a view tree.
#[derive(Debug, Clone, Default)]
pub struct EventRouter {
    focus: Option<Vec<String>>,
    tracking: Option<Vec<String>>,
}

impl EventRouter {
    /// Creates a router with nothing focused or tracked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The focused node, if its path still resolves.
    #[must_use]
    pub fn focused(&self, tree: &ViewTree) -> Option<NodeId> {
        tree.resolve(self.focus.as_deref()?)
    }

    /// The node tracking the pointer, if its path still resolves.
    #[must_use]
    pub fn tracking(&self, tree: &ViewTree) -> Option<NodeId> {
        tree.resolve(self.tracking.as_deref()?)
    }

    /// Delivers one event. Returns true if some node received it.
    pub fn dispatch(
        &mut self,
        tree: &mut ViewTree,
        tasks: &mut TaskQueue,
        event: &Event,
    ) -> ViewResult<bool> {
        self.refresh_focus(tree);

        match event {
            Event::MouseDown(pt) => {
                let target = tree.find(tree.root(), *pt, &Filter::enabled_interactive());
                self.set_focus(tree, tasks, target)?;
                let Some(target) = target else {
                    return Ok(false);
                };
                let pt = *pt;
                if tree.with_view(target, tasks, |view, cx| view.mousedown(pt, cx))? {
                    self.tracking = Some(tree.id_path(target));
                }
                Ok(true)
            }
            Event::MouseMotion(pt) => {
                let Some(target) = self.tracking(tree) else {
                    return Ok(false);
                };
                let pt = *pt;
                tree.with_view(target, tasks, |view, cx| view.mousemotion(pt, cx))?;
                Ok(true)
            }
            Event::MouseUp(pt) => {
                let tracked = self.tracking(tree);
                self.tracking = None;
                let Some(target) = tracked else {
                    return Ok(false);
                };
                let pt = *pt;
                tree.with_view(target, tasks, |view, cx| {
                    view.mouseup(pt, cx);
                    if cx.frame().contains(pt) {
                        view.click(pt, cx);
                    }
                })?;
                Ok(true)
            }
            Event::KeyDown { key: Key::Tab, mods } => self.cycle_focus(tree, tasks, *mods),
            Event::KeyDown { key, mods } => {
                let (key, mods) = (*key, *mods);
                self.to_focused(tree, tasks, |view, cx| view.keydown(key, mods, cx))
            }
            Event::KeyUp { key, mods } => {
                let (key, mods) = (*key, *mods);
                self.to_focused(tree, tasks, |view, cx| view.keyup(key, mods, cx))
            }
            Event::TextInput(text) => {
                self.to_focused(tree, tasks, |view, cx| view.textinput(text, cx))
            }
        }
    }

    /// Moves focus to `target`, blurring the old node and focusing the new.
    pub fn set_focus(
        &mut self,
        tree: &mut ViewTree,
        tasks: &mut TaskQueue,
        target: Option<NodeId>,
    ) -> ViewResult<()> {
        let current = self.focused(tree);
        if current == target {
            return Ok(());
        }

        if let Some(old) = current {
            tree.set_focused_flag(old, false);
            tree.with_view(old, tasks, |view, cx| view.blur(cx))?;
        }
        self.focus = target.map(|id| tree.id_path(id));
        if let Some(new) = target {
            tree.set_focused_flag(new, true);
            tree.with_view(new, tasks, |view, cx| view.focus(cx))?;
        }

        tracing::debug!(from = ?current, to = ?target, "focus changed");
        Ok(())
    }

    fn cycle_focus(
        &mut self,
        tree: &mut ViewTree,
        tasks: &mut TaskQueue,
        mods: Modifiers,
    ) -> ViewResult<bool> {
        let candidates = tree.find_all(tree.root(), &Filter::enabled_interactive());
        if candidates.is_empty() {
            return Ok(false);
        }
        let count = candidates.len();
        let current = self
            .focused(tree)
            .and_then(|id| candidates.iter().position(|c| *c == id));
        let next = match (current, mods.shift) {
            (Some(i), false) => (i + 1) % count,
            (Some(i), true) => (i + count - 1) % count,
            (None, false) => 0,
            (None, true) => count - 1,
        };
        self.set_focus(tree, tasks, Some(candidates[next]))?;
        Ok(true)
    }

    fn to_focused(
        &mut self,
        tree: &mut ViewTree,
        tasks: &mut TaskQueue,
        hook: impl FnOnce(&mut dyn View, &mut EventCx<'_>),
    ) -> ViewResult<bool> {
        let Some(target) = self.focused(tree) else {
            return Ok(false);
        };
        tree.with_view(target, tasks, hook)?;
        Ok(true)
    }

    /// Re-applies the focus flag after a rebuild, or forgets a focus path
    /// that no longer resolves.
    pub(crate) fn refresh_focus(&mut self, tree: &mut ViewTree) {
        if self.focus.is_none() {
            return;
        }
        match self.focused(tree) {
            Some(id) => tree.set_focused_flag(id, true),
            None => {
                tracing::trace!("focused node is gone");
                self.focus = None;
            }
        }
    }
}
