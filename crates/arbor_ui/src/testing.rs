//! Minimal views shared by unit tests.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use arbor_core::{Point, Size};

use crate::env::Environment;
use crate::event::EventCx;
use crate::input::{Key, Modifiers};
use crate::layout::{LayoutPolicy, StackLayout};
use crate::view::View;

/// Plain container.
#[derive(Clone)]
pub struct Group;

impl View for Group {}

/// Stacking container.
#[derive(Clone)]
pub struct Row(StackLayout);

impl Row {
    pub fn new(layout: StackLayout) -> Self {
        Self(layout)
    }
}

impl View for Row {
    fn layout_policy(&self) -> LayoutPolicy {
        LayoutPolicy::Stack(self.0)
    }
}

/// Leaf with a fixed minimum and an optional preferred size that shrinks
/// to the offered space.
#[derive(Clone)]
pub struct Leaf {
    minimum: Size,
    preferred: Option<Size>,
}

impl Leaf {
    pub fn new(minimum: Size) -> Self {
        Self {
            minimum,
            preferred: None,
        }
    }

    pub fn sized(minimum: Size, preferred: Size) -> Self {
        Self {
            minimum,
            preferred: Some(preferred),
        }
    }
}

impl View for Leaf {
    fn minimum_size(&self, _env: &Environment, _children: Size) -> Size {
        self.minimum
    }

    fn content_size(&self, available: Size, _env: &Environment) -> Size {
        self.preferred.map_or(Size::ZERO, |p| {
            Size::new(p.width.min(available.width), p.height.min(available.height))
        })
    }
}

/// Records `state_changed` calls with `i32` payloads.
#[derive(Clone, Default)]
pub struct Recorder {
    changes: Rc<RefCell<Vec<(String, Option<i32>)>>>,
}

impl Recorder {
    pub fn changes(&self) -> Vec<(String, Option<i32>)> {
        self.changes.borrow().clone()
    }
}

impl View for Recorder {
    fn state_changed(&mut self, name: &str, value: &(dyn Any + Send + Sync)) {
        self.changes
            .borrow_mut()
            .push((name.to_owned(), value.downcast_ref::<i32>().copied()));
    }
}

/// Interactive view logging every hook it receives.
#[derive(Clone, Default)]
pub struct Tap {
    log: Rc<RefCell<Vec<String>>>,
}

impl Tap {
    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    fn push(&self, hook: &str) {
        self.log.borrow_mut().push(hook.to_owned());
    }
}

impl View for Tap {
    fn interactive(&self) -> bool {
        true
    }

    fn mousedown(&mut self, _pt: Point, _cx: &mut EventCx<'_>) -> bool {
        self.push("mousedown");
        true
    }

    fn mousemotion(&mut self, _pt: Point, _cx: &mut EventCx<'_>) {
        self.push("mousemotion");
    }

    fn mouseup(&mut self, _pt: Point, _cx: &mut EventCx<'_>) {
        self.push("mouseup");
    }

    fn click(&mut self, _pt: Point, _cx: &mut EventCx<'_>) {
        self.push("click");
    }

    fn keydown(&mut self, _key: Key, _mods: Modifiers, _cx: &mut EventCx<'_>) {
        self.push("keydown");
    }

    fn textinput(&mut self, _text: &str, _cx: &mut EventCx<'_>) {
        self.push("textinput");
    }

    fn focus(&mut self, _cx: &mut EventCx<'_>) {
        self.push("focus");
    }

    fn blur(&mut self, _cx: &mut EventCx<'_>) {
        self.push("blur");
    }
}
