//! Segmented control.

use std::fmt;
use std::rc::Rc;

use arbor_core::Binding;

use crate::action::Action;
use crate::env::Environment;
use crate::layout::{LayoutPolicy, StackLayout};
use crate::node::{Child, ViewNode};
use crate::view::View;
use crate::widget::Button;

/// A row of buttons, one per declared child, with a single selection.
///
/// Each segment is drawn with an asset for its position (`"button"` when
/// alone, otherwise `"segment.left"`, `"segment.center"` or
/// `"segment.right"`), suffixed with `".selected"` for the selected one.
#[derive(Clone)]
pub struct SegmentedButton {
    selection: Binding<usize>,
    on_select: Option<Rc<dyn Fn(usize)>>,
    disabled: bool,
}

impl SegmentedButton {
    /// A control editing `selection`.
    #[must_use]
    pub fn new(selection: Binding<usize>) -> Self {
        Self {
            selection,
            on_select: None,
            disabled: false,
        }
    }

    /// Runs `f` with the segment index before the selection changes.
    #[must_use]
    pub fn on_select(mut self, f: impl Fn(usize) + 'static) -> Self {
        self.on_select = Some(Rc::new(f));
        self
    }

    /// Disables every segment.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Builds the control node around `items`, rebuilding whenever the
    /// selection changes.
    pub fn build<I>(self, items: I) -> ViewNode
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        let selection = self.selection.clone();
        ViewNode::new(self).bind("selection", &selection).children(items)
    }

    fn asset(index: usize, last: bool) -> &'static str {
        match (index, last) {
            (0, true) => "button",
            (0, false) => "segment.left",
            (_, true) => "segment.right",
            (_, false) => "segment.center",
        }
    }

    fn select_action(&self, index: usize) -> Action {
        let selection = self.selection.clone();
        let on_select = self.on_select.clone();
        Action::sync(move || {
            if let Some(f) = &on_select {
                f(index);
            }
            selection.set(index);
            Ok(())
        })
    }
}

impl View for SegmentedButton {
    fn layout_policy(&self) -> LayoutPolicy {
        LayoutPolicy::Stack(StackLayout::horizontal())
    }

    fn content(&self, declared: &[Child], _env: &Environment) -> Vec<Child> {
        let mut items = Vec::new();
        for child in declared {
            if child.expand_into(&mut items).is_err() {
                // let the reconciler report the malformed child
                return declared.to_vec();
            }
        }

        let selected = self.selection.get();
        let count = items.len();
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let mut asset = Self::asset(index, index + 1 == count).to_owned();
                if index == selected {
                    asset.push_str(".selected");
                }
                let button = Button::new().asset(asset).action(self.select_action(index));
                Child::from(ViewNode::new(button).disabled(self.disabled).child(item))
            })
            .collect()
    }
}

impl fmt::Debug for SegmentedButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentedButton")
            .field("selection", &self.selection)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}
