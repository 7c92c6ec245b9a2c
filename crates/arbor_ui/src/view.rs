//! The view contract every widget implements.

use std::any::{Any, type_name};

use arbor_core::{Point, Rect, Size};

use crate::env::Environment;
use crate::event::EventCx;
use crate::input::{Key, Modifiers};
use crate::layout::LayoutPolicy;
use crate::node::Child;
use crate::render::Renderer;

/// Object-safety helpers, implemented for every `View + Clone`.
pub trait ViewObject {
    /// Clones the behaviour into a new box.
    fn clone_view(&self) -> Box<dyn View>;

    /// Upcast for downcasting to the concrete widget.
    fn as_any(&self) -> &dyn Any;
}

impl<T: View + Clone> ViewObject for T {
    fn clone_view(&self) -> Box<dyn View> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Clone for Box<dyn View> {
    fn clone(&self) -> Self {
        self.clone_view()
    }
}

/// Behaviour of a node: content, measurement, drawing and event hooks.
///
/// Every method has a default, so a plain container is just
/// `#[derive(Clone)] struct Group; impl View for Group {}`.
pub trait View: ViewObject + 'static {
    /// Type name used to build view ids (`"{type_name}-{index}"`).
    fn type_name(&self) -> &'static str {
        short_type_name(type_name::<Self>())
    }

    /// Whether the node takes pointer and keyboard input.
    fn interactive(&self) -> bool {
        false
    }

    /// Children to reconcile, given the declared contents.
    ///
    /// Override to wrap or synthesize children.
    fn content(&self, declared: &[Child], _env: &Environment) -> Vec<Child> {
        declared.to_vec()
    }

    /// How subviews are combined and placed.
    fn layout_policy(&self) -> LayoutPolicy {
        LayoutPolicy::Overlay
    }

    /// Minimum content size, excluding this node's padding and border.
    ///
    /// `children` is the minimum already folded over the subviews.
    fn minimum_size(&self, _env: &Environment, children: Size) -> Size {
        children
    }

    /// Content size for the offered space, excluding padding and border.
    fn content_size(&self, _available: Size, _env: &Environment) -> Size {
        Size::ZERO
    }

    /// Widget-specific drawing into `rect` (the node's inner rect).
    fn draw(&self, _renderer: &mut dyn Renderer, _rect: Rect, _cx: &DrawCx<'_>) {}

    /// Pointer pressed over this node. Return true to track the pointer
    /// until release.
    fn mousedown(&mut self, _pt: Point, _cx: &mut EventCx<'_>) -> bool {
        false
    }

    /// Pointer moved while tracked.
    fn mousemotion(&mut self, _pt: Point, _cx: &mut EventCx<'_>) {}

    /// Pointer released while tracked.
    fn mouseup(&mut self, _pt: Point, _cx: &mut EventCx<'_>) {}

    /// Press and release both landed on this node.
    fn click(&mut self, _pt: Point, _cx: &mut EventCx<'_>) {}

    /// Key pressed while focused.
    fn keydown(&mut self, _key: Key, _mods: Modifiers, _cx: &mut EventCx<'_>) {}

    /// Key released while focused.
    fn keyup(&mut self, _key: Key, _mods: Modifiers, _cx: &mut EventCx<'_>) {}

    /// Text entered while focused.
    fn textinput(&mut self, _text: &str, _cx: &mut EventCx<'_>) {}

    /// Gained focus.
    fn focus(&mut self, _cx: &mut EventCx<'_>) {}

    /// Lost focus.
    fn blur(&mut self, _cx: &mut EventCx<'_>) {}

    /// A value bound to this node changed. Runs before the node rebuilds.
    fn state_changed(&mut self, _name: &str, _value: &(dyn Any + Send + Sync)) {}
}

/// Read-only context handed to `View::draw`.
#[derive(Debug, Clone, Copy)]
pub struct DrawCx<'a> {
    /// The node's environment.
    pub env: &'a Environment,
    /// The node's full frame, including padding and border.
    pub frame: Rect,
    /// Whether the node is disabled.
    pub disabled: bool,
}

/// Strips the module path and generic arguments from a type name.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Panel;

    impl View for Panel {}

    #[test]
    fn test_type_name_is_short() {
        assert_eq!(Panel.type_name(), "Panel");
        assert_eq!(short_type_name("a::b::Stack<c::D>"), "Stack");
    }

    #[test]
    fn test_boxed_view_clones_and_downcasts() {
        let view: Box<dyn View> = Box::new(Panel);
        let copy = view.clone();

        assert!(copy.as_any().downcast_ref::<Panel>().is_some());
        assert_eq!(copy.type_name(), "Panel");
    }
}
