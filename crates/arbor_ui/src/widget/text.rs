//! Static text label.

use std::sync::Arc;

use arbor_core::{Color, Rect, Size};

use crate::env::Environment;
use crate::render::Renderer;
use crate::view::{DrawCx, View};

/// Disabled text color.
const DIMMED: Color = Color::rgb(150, 150, 150);

/// A single run of text, measured with the environment's font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    text: Arc<str>,
}

impl Text {
    /// Creates a label.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self { text: text.into() }
    }

    /// The label text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl View for Text {
    fn minimum_size(&self, env: &Environment, _children: Size) -> Size {
        env.font_handle().measure(&self.text, None)
    }

    fn content_size(&self, available: Size, env: &Environment) -> Size {
        let width = (available.width > 0).then_some(available.width);
        env.font_handle().measure(&self.text, width)
    }

    fn draw(&self, renderer: &mut dyn Renderer, rect: Rect, cx: &DrawCx<'_>) {
        let color = if cx.disabled { DIMMED } else { cx.env.color() };
        renderer.draw_text(&self.text, rect, color, None);
    }
}
