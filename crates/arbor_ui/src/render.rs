//! UI rendering system.
//!
//! The tree never rasterizes. It walks nodes in tree order and issues
//! primitive calls against a `Renderer`; later siblings and deeper
//! descendants draw over earlier ones.

use std::ops::Range;

use arbor_core::{Color, Rect, Size};

use crate::error::ViewResult;
use crate::tree::{NodeId, ViewTree};
use crate::view::DrawCx;

/// Drawing backend.
pub trait Renderer {
    /// Fills `rect` with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draws a named asset stretched over `rect`.
    fn draw_asset(&mut self, name: &str, rect: Rect);

    /// Measures `text`, wrapping at `width` when given.
    fn measure_text(&self, text: &str, width: Option<i32>) -> Size;

    /// Draws `text` in `rect`, highlighting the `selection` char range.
    fn draw_text(&mut self, text: &str, rect: Rect, color: Color, selection: Option<Range<usize>>);
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// Filled rectangle.
    Fill {
        /// Bounds.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// Themed asset.
    Asset {
        /// Asset name.
        name: String,
        /// Bounds.
        rect: Rect,
    },
    /// Text.
    Text {
        /// Text content.
        text: String,
        /// Bounds.
        rect: Rect,
        /// Text color.
        color: Color,
        /// Highlighted char range.
        selection: Option<Range<usize>>,
    },
}

/// Renderer that records commands instead of drawing.
///
/// Text is measured with fixed metrics: `advance` per char, `line_height`
/// per line.
#[derive(Debug, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    advance: i32,
    line_height: i32,
}

impl DrawList {
    /// Creates an empty list with 8x16 text metrics.
    #[must_use]
    pub fn new() -> Self {
        Self::with_metrics(8, 16)
    }

    /// Creates an empty list with the given text metrics.
    #[must_use]
    pub fn with_metrics(advance: i32, line_height: i32) -> Self {
        Self {
            commands: Vec::with_capacity(256),
            advance,
            line_height,
        }
    }

    /// Begins a new frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    /// Recorded commands, in issue order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the list empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Returns the total command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DrawList {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Fill { rect, color });
    }

    fn draw_asset(&mut self, name: &str, rect: Rect) {
        self.commands.push(DrawCommand::Asset {
            name: name.to_owned(),
            rect,
        });
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn measure_text(&self, text: &str, width: Option<i32>) -> Size {
        let per_line = width.map(|w| (w / self.advance.max(1)).max(1));
        let (mut lines, mut widest) = (0, 0);
        for line in text.split('\n') {
            let chars = line.chars().count() as i32;
            let (count, used) = match per_line {
                Some(limit) if chars > limit => ((chars + limit - 1) / limit, limit),
                _ => (1, chars),
            };
            lines += count;
            widest = widest.max(used);
        }
        Size::new(widest * self.advance, lines * self.line_height)
    }

    fn draw_text(&mut self, text: &str, rect: Rect, color: Color, selection: Option<Range<usize>>) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            rect,
            color,
            selection,
        });
    }
}

impl ViewTree {
    /// Draws the subtree at `id` in tree order.
    ///
    /// Each node fills its frame with its background, if any, then draws
    /// itself into its inner rect; subviews follow.
    pub fn render(&self, id: NodeId, renderer: &mut dyn Renderer) -> ViewResult<()> {
        let node = self.node(id)?;
        let frame = node.frame();

        if let Some(color) = node.configuration().background {
            renderer.fill_rect(frame, color);
        }
        let cx = DrawCx {
            env: node.env(),
            frame,
            disabled: node.is_disabled(),
        };
        node.view.draw(renderer, node.inner(), &cx);

        for child in node.subviews() {
            self.render(*child, renderer)?;
        }
        Ok(())
    }
}
