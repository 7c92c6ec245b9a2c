//! Stacking containers.

use serde::Deserialize;

use crate::config::parse_options;
use crate::error::ConfigError;
use crate::layout::{Alignment, LayoutPolicy, StackLayout};
use crate::node::{Child, ViewNode};
use crate::view::View;

/// Places its subviews one after another along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stack {
    layout: StackLayout,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct StackOptions {
    spacing: Option<i32>,
    justify: Option<AlignmentName>,
    align: Option<AlignmentName>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum AlignmentName {
    Start,
    Center,
    End,
}

impl From<AlignmentName> for Alignment {
    fn from(name: AlignmentName) -> Self {
        match name {
            AlignmentName::Start => Self::Start,
            AlignmentName::Center => Self::Center,
            AlignmentName::End => Self::End,
        }
    }
}

impl Stack {
    /// Left-to-right stack.
    #[must_use]
    pub fn horizontal() -> Self {
        Self {
            layout: StackLayout::horizontal(),
        }
    }

    /// Top-to-bottom stack.
    #[must_use]
    pub fn vertical() -> Self {
        Self {
            layout: StackLayout::vertical(),
        }
    }

    /// Sets the gap between subviews.
    #[must_use]
    pub fn spacing(mut self, spacing: i32) -> Self {
        self.layout = self.layout.with_spacing(spacing);
        self
    }

    /// Sets main axis alignment.
    #[must_use]
    pub fn justify(mut self, alignment: Alignment) -> Self {
        self.layout = self.layout.justify(alignment);
        self
    }

    /// Sets cross axis alignment.
    #[must_use]
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.layout = self.layout.align(alignment);
        self
    }

    /// Applies `spacing`, `justify` and `align` given as TOML.
    pub fn options(mut self, options: &str) -> Result<Self, ConfigError> {
        let parsed: StackOptions = parse_options("Stack", &["spacing", "justify", "align"], options)?;
        if let Some(spacing) = parsed.spacing {
            self = self.spacing(spacing);
        }
        if let Some(justify) = parsed.justify {
            self = self.justify(justify.into());
        }
        if let Some(align) = parsed.align {
            self = self.align(align.into());
        }
        Ok(self)
    }

    /// The stacking policy.
    #[must_use]
    pub fn layout(&self) -> StackLayout {
        self.layout
    }
}

impl View for Stack {
    fn layout_policy(&self) -> LayoutPolicy {
        LayoutPolicy::Stack(self.layout)
    }
}

/// A horizontal stack node holding `children`.
pub fn hstack<I>(children: I) -> ViewNode
where
    I: IntoIterator,
    I::Item: Into<Child>,
{
    ViewNode::new(Stack::horizontal()).children(children)
}

/// A vertical stack node holding `children`.
pub fn vstack<I>(children: I) -> ViewNode
where
    I: IntoIterator,
    I::Item: Into<Child>,
{
    ViewNode::new(Stack::vertical()).children(children)
}
