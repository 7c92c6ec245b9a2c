//! Layout system for UI positioning.
//!
//! Layout runs in two top-down passes over the live tree: `resize` decides
//! every frame's size from the space offered by its parent, then
//! `reposition` places frames inside their parent's inner rect. Minimum
//! sizes are a separate bottom-up query, computed on demand and never
//! cached.

use arbor_core::{Axis, Point, Rect, Size};

use crate::error::ViewResult;
use crate::node::NodeFlags;
use crate::tree::{NodeId, ViewTree};

/// How a node combines and places its subviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutPolicy {
    /// Union of children; each child centered in the inner rect.
    #[default]
    Overlay,
    /// Children placed one after another along an axis.
    Stack(StackLayout),
}

/// Layout alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Align to start (left/top).
    #[default]
    Start,
    /// Align to center.
    Center,
    /// Align to end (right/bottom).
    End,
}

impl Alignment {
    /// Offset of an extent of `used` inside `space`.
    fn offset(self, space: i32, used: i32) -> i32 {
        match self {
            Self::Start => 0,
            Self::Center => (space - used).div_euclid(2),
            Self::End => space - used,
        }
    }
}

/// Stacking policy: sum along `axis`, max across it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackLayout {
    /// Stacking axis.
    pub axis: Axis,
    /// Main axis alignment of the whole run.
    pub justify: Alignment,
    /// Cross axis alignment of each child.
    pub align: Alignment,
    /// Gap between elements.
    pub spacing: i32,
}

impl Default for StackLayout {
    fn default() -> Self {
        Self {
            axis: Axis::Horizontal,
            justify: Alignment::Center,
            align: Alignment::Center,
            spacing: 0,
        }
    }
}

impl StackLayout {
    /// Creates a horizontal stack.
    #[must_use]
    pub fn horizontal() -> Self {
        Self::default()
    }

    /// Creates a vertical stack.
    #[must_use]
    pub fn vertical() -> Self {
        Self {
            axis: Axis::Vertical,
            ..Self::default()
        }
    }

    /// Sets the gap between elements.
    #[must_use]
    pub const fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets main axis alignment.
    #[must_use]
    pub const fn justify(mut self, alignment: Alignment) -> Self {
        self.justify = alignment;
        self
    }

    /// Sets cross axis alignment.
    #[must_use]
    pub const fn align(mut self, alignment: Alignment) -> Self {
        self.align = alignment;
        self
    }

    /// Total extent of `sizes` laid end to end.
    #[must_use]
    pub fn measure(&self, sizes: &[Size]) -> Size {
        let main: i32 = sizes.iter().map(|s| s.along(self.axis)).sum();
        let cross = sizes
            .iter()
            .map(|s| s.along(self.axis.cross()))
            .max()
            .unwrap_or(0);
        Size::from_axes(self.axis, main + self.total_gap(sizes.len()), cross)
    }

    /// Lays out a list of sizes within the given bounds.
    ///
    /// Returns the rect for each element.
    #[must_use]
    pub fn arrange(&self, bounds: Rect, sizes: &[Size]) -> Vec<Rect> {
        if sizes.is_empty() {
            return Vec::new();
        }

        let axis = self.axis;
        let cross_axis = axis.cross();
        let run = self.measure(sizes).along(axis);
        let space = bounds.size.along(axis);
        let cross_space = bounds.size.along(cross_axis);

        let mut main = bounds.origin.along(axis) + self.justify.offset(space, run);
        let cross_start = bounds.origin.along(cross_axis);

        let mut results = Vec::with_capacity(sizes.len());
        for size in sizes {
            let cross = cross_start + self.align.offset(cross_space, size.along(cross_axis));
            results.push(Rect::from_origin_size(
                Point::from_axes(axis, main, cross),
                *size,
            ));
            main += size.along(axis) + self.spacing;
        }
        results
    }

    fn total_gap(&self, count: usize) -> i32 {
        let gaps = i32::try_from(count.saturating_sub(1)).unwrap_or(i32::MAX);
        self.spacing.saturating_mul(gaps)
    }
}

impl ViewTree {
    /// Minimum content size of `id`, excluding its own padding and border.
    ///
    /// Folds over the subviews bottom-up on every call.
    pub fn minimum_size(&self, id: NodeId) -> ViewResult<Size> {
        let node = self.node(id)?;
        let subviews = node.subviews();

        let children = match node.view.layout_policy() {
            LayoutPolicy::Overlay => {
                let mut acc = Size::ZERO;
                for child in subviews {
                    let min = self.minimum_size(*child)?;
                    let child_node = self.node(*child)?;
                    let insets = child_node.padding_insets() + child_node.border_insets();
                    acc = Size::new(
                        min.width.max(acc.width + insets.width()),
                        min.height.max(acc.height + insets.height()),
                    );
                }
                acc
            }
            LayoutPolicy::Stack(stack) => {
                let sizes = subviews
                    .iter()
                    .map(|child| {
                        let child_node = self.node(*child)?;
                        let insets = child_node.padding_insets() + child_node.border_insets();
                        Ok(self.minimum_size(*child)?.outset(insets))
                    })
                    .collect::<ViewResult<Vec<_>>>()?;
                stack.measure(&sizes)
            }
        };

        Ok(node.view.minimum_size(node.env(), children))
    }

    /// Sets the frame size of `id` and its descendants for the offered space.
    ///
    /// The inside space is `available` less padding and border, floored at
    /// zero on each axis. Leaves never measure below their minimum.
    pub fn resize(&mut self, id: NodeId, available: Size) -> ViewResult<()> {
        let (policy, insets, subviews) = {
            let node = self.node(id)?;
            (
                node.view.layout_policy(),
                node.padding_insets() + node.border_insets(),
                node.subviews().to_vec(),
            )
        };
        let inside = available.inset(insets);

        let children = match policy {
            LayoutPolicy::Overlay => {
                let mut max = Size::ZERO;
                for child in &subviews {
                    self.resize(*child, inside)?;
                    max = max.max(self.node(*child)?.frame().size);
                }
                max
            }
            LayoutPolicy::Stack(stack) => {
                let mut remaining = inside.along(stack.axis);
                let mut sizes = Vec::with_capacity(subviews.len());
                for child in &subviews {
                    let offered = Size::from_axes(
                        stack.axis,
                        remaining.max(0),
                        inside.along(stack.axis.cross()),
                    );
                    self.resize(*child, offered)?;
                    let size = self.node(*child)?.frame().size;
                    remaining -= size.along(stack.axis) + stack.spacing;
                    sizes.push(size);
                }
                stack.measure(&sizes)
            }
        };

        let node = self.node(id)?;
        let mut content = node.view.content_size(inside, node.env());
        if subviews.is_empty() {
            content = content.max(node.view.minimum_size(node.env(), Size::ZERO));
        }
        let size = children.max(content).outset(insets);

        tracing::trace!(node = %id, %available, %size, "resized");
        self.node_mut(id)?.state.frame.size = size;
        Ok(())
    }

    /// Places `id` inside `inside`, then its subviews inside its inner rect.
    pub fn reposition(&mut self, id: NodeId, inside: Rect) -> ViewResult<()> {
        let node = self.node_mut(id)?;
        node.state.frame = inside.center(node.state.frame.size);
        let inner = node.inner();
        let policy = node.view.layout_policy();
        let subviews = node.subviews().to_vec();

        match policy {
            LayoutPolicy::Overlay => {
                for child in subviews {
                    self.reposition(child, inner)?;
                }
            }
            LayoutPolicy::Stack(stack) => {
                let sizes = subviews
                    .iter()
                    .map(|child| Ok(self.node(*child)?.frame().size))
                    .collect::<ViewResult<Vec<_>>>()?;
                for (child, rect) in subviews.into_iter().zip(stack.arrange(inner, &sizes)) {
                    self.reposition(child, rect)?;
                }
            }
        }
        Ok(())
    }

    /// Lays out the subtree at `id` into `rect`.
    ///
    /// Reconciles first when the node has no subviews yet. Returns the ids
    /// discarded by that reconciliation, if any.
    pub fn layout(&mut self, id: NodeId, rect: Rect) -> ViewResult<Vec<NodeId>> {
        let discarded = if self.node(id)?.subviews().is_empty() {
            self.rebuild(id)?
        } else {
            Vec::new()
        };
        self.resize(id, rect.size)?;
        self.reposition(id, rect)?;
        self.node_mut(id)?.state.flags.clear(NodeFlags::DIRTY);
        self.stats.layouts += 1;
        tracing::trace!(node = %id, %rect, "layout complete");
        Ok(discarded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ViewNode;
    use crate::testing::{Group, Leaf, Row};
    use arbor_core::Insets;

    fn laid_out(root: ViewNode, viewport: Rect) -> ViewTree {
        let mut tree = ViewTree::new(root);
        let root = tree.root();
        tree.layout(root, viewport).unwrap();
        tree
    }

    #[test]
    fn test_layout_horizontal() {
        let layout = StackLayout::horizontal()
            .with_spacing(10)
            .justify(Alignment::Start)
            .align(Alignment::Start);
        let bounds = Rect::new(0, 0, 200, 50);
        let sizes = [Size::new(30, 20), Size::new(40, 20), Size::new(30, 20)];

        let result = layout.arrange(bounds, &sizes);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].left(), 0);
        assert_eq!(result[1].left(), 40); // 30 + 10 gap
        assert_eq!(result[2].left(), 90); // 40 + 40 + 10 gap
    }

    #[test]
    fn test_layout_vertical_centered() {
        let layout = StackLayout::vertical().with_spacing(2);
        let result = layout.arrange(Rect::new(0, 0, 10, 21), &[Size::new(4, 5), Size::new(6, 5)]);

        // run is 12 tall in 21: offset floors to 4
        assert_eq!(result[0], Rect::new(3, 4, 4, 5));
        assert_eq!(result[1], Rect::new(2, 11, 6, 5));
    }

    #[test]
    fn test_end_to_end_padding_and_minimum() {
        let root = ViewNode::new(Group)
            .padding(Insets::all(10))
            .child(ViewNode::new(Leaf::new(Size::new(50, 20))));
        let tree = laid_out(root, Rect::new(0, 0, 200, 100));
        let root = tree.node(tree.root()).unwrap();
        let leaf = tree.node(root.subviews()[0]).unwrap();

        assert_eq!(leaf.frame().size, Size::new(50, 20));
        assert_eq!(root.frame(), Rect::new(65, 30, 70, 40));
        assert_eq!(leaf.frame(), root.inner().center(Size::new(50, 20)));
        assert!(!tree.is_dirty());
    }

    #[test]
    fn test_resize_clamps_inside_per_axis() {
        let root = ViewNode::new(Group)
            .padding(Insets::symmetric(10, 1))
            .child(ViewNode::new(Leaf::sized(Size::new(0, 0), Size::new(100, 100))));
        let mut tree = ViewTree::new(root);
        let root = tree.root();
        tree.rebuild(root).unwrap();
        tree.resize(root, Size::new(30, 5)).unwrap();

        // inside is (28, 0): the leaf fills width and gets zero height
        let leaf = tree.subviews(root)[0];
        assert_eq!(tree.node(leaf).unwrap().frame().size, Size::new(28, 0));
        assert_eq!(tree.node(root).unwrap().frame().size, Size::new(30, 20));
    }

    #[test]
    fn test_inset_conservation() {
        let root = ViewNode::new(Group)
            .padding(Insets::new(1, 2, 3, 4))
            .border(Insets::all(2))
            .child(ViewNode::new(Leaf::new(Size::new(7, 9))));
        let tree = laid_out(root, Rect::new(0, 0, 100, 100));
        let id = tree.root();
        let node = tree.node(id).unwrap();
        let insets = node.padding_insets() + node.border_insets();

        let min = tree.minimum_size(id).unwrap();
        assert_eq!(min, Size::new(7, 9));
        assert_eq!(node.frame().size, min.outset(insets));
    }

    #[test]
    fn test_default_minimum_fold() {
        let root = ViewNode::new(Group).children([
            ViewNode::new(Leaf::new(Size::new(10, 5))).padding(Insets::all(2)),
            ViewNode::new(Leaf::new(Size::new(3, 30))).padding(Insets::all(1)),
        ]);
        let mut tree = ViewTree::new(root);
        let root = tree.root();
        tree.rebuild(root).unwrap();

        // first: max(10, 0 + 4) = 10, max(5, 0 + 4) = 5
        // second: max(3, 10 + 2) = 12, max(30, 5 + 2) = 30
        assert_eq!(tree.minimum_size(root).unwrap(), Size::new(12, 30));
    }

    #[test]
    fn test_stack_sums_along_axis() {
        let root = ViewNode::new(Row::new(StackLayout::horizontal().with_spacing(5))).children([
            ViewNode::new(Leaf::new(Size::new(10, 4))),
            ViewNode::new(Leaf::new(Size::new(20, 8))),
        ]);
        let tree = laid_out(root, Rect::new(0, 0, 100, 50));
        let id = tree.root();
        let frames: Vec<Rect> = tree
            .subviews(id)
            .iter()
            .map(|c| tree.node(*c).unwrap().frame())
            .collect();

        assert_eq!(tree.node(id).unwrap().frame(), Rect::new(32, 21, 35, 8));
        assert_eq!(tree.minimum_size(id).unwrap(), Size::new(35, 8));
        assert_eq!(frames[0], Rect::new(32, 23, 10, 4));
        assert_eq!(frames[1], Rect::new(47, 21, 20, 8));
    }
}
