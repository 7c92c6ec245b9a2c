//! Push button.

use std::sync::Arc;

use arbor_core::{Point, Rect};

use crate::action::Action;
use crate::event::EventCx;
use crate::layout::{LayoutPolicy, StackLayout};
use crate::node::ViewNode;
use crate::render::Renderer;
use crate::view::{DrawCx, View};
use crate::widget::Text;

/// A horizontal stack that fires an action when clicked.
///
/// Draws the themed asset `asset`, or `"{asset}.pressed"` while the
/// pointer is held down over it.
#[derive(Debug, Clone)]
pub struct Button {
    action: Option<Action>,
    asset: Arc<str>,
    pressed: bool,
}

impl Default for Button {
    fn default() -> Self {
        Self {
            action: None,
            asset: Arc::from("button"),
            pressed: false,
        }
    }
}

impl Button {
    /// A button using the `"button"` asset and no action.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the action fired on click.
    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Sets the base asset name.
    #[must_use]
    pub fn asset(mut self, asset: impl Into<Arc<str>>) -> Self {
        self.asset = asset.into();
        self
    }

    /// Wraps this button around a text label.
    #[must_use]
    pub fn label(self, label: &str) -> ViewNode {
        ViewNode::new(self).child(ViewNode::new(Text::new(label)))
    }

    /// Whether the pointer is currently held down over the button.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// The asset drawn for the current state.
    #[must_use]
    pub fn current_asset(&self) -> String {
        if self.pressed {
            format!("{}.pressed", self.asset)
        } else {
            self.asset.to_string()
        }
    }
}

impl View for Button {
    fn interactive(&self) -> bool {
        true
    }

    fn layout_policy(&self) -> LayoutPolicy {
        LayoutPolicy::Stack(StackLayout::horizontal())
    }

    fn draw(&self, renderer: &mut dyn Renderer, _rect: Rect, cx: &DrawCx<'_>) {
        cx.env.draw_asset(renderer, &self.current_asset(), cx.frame);
    }

    fn mousedown(&mut self, _pt: Point, _cx: &mut EventCx<'_>) -> bool {
        self.pressed = true;
        true
    }

    fn mousemotion(&mut self, pt: Point, cx: &mut EventCx<'_>) {
        self.pressed = cx.frame().contains(pt);
    }

    fn mouseup(&mut self, _pt: Point, _cx: &mut EventCx<'_>) {
        self.pressed = false;
    }

    fn click(&mut self, _pt: Point, cx: &mut EventCx<'_>) {
        if let Some(action) = &self.action {
            cx.fire(action);
        }
    }
}
