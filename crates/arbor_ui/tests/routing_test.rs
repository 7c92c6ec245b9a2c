//! # Routing Integration Tests
//!
//! Hit testing, focus, pointer tracking and detached tasks, driven
//! through `Ui`.

use std::cell::Cell;
use std::rc::Rc;

use arbor_ui::widget::{hstack, Button};
use arbor_ui::{
    Action, ActionError, Binding, Child, Environment, Event, Filter, Insets, Key, LayoutPolicy,
    Modifiers, Point, Rect, Size, StackLayout, Ui, View, ViewNode, ViewTree,
};

#[derive(Clone)]
struct Panel;

impl View for Panel {}

/// Interactive area with a fixed minimum size.
#[derive(Clone)]
struct Target(Size);

impl View for Target {
    fn interactive(&self) -> bool {
        true
    }

    fn minimum_size(&self, _env: &Environment, children: Size) -> Size {
        children.max(self.0)
    }
}

/// Sets its flag when dropped.
struct DropFlag(Rc<Cell<bool>>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

/// One button per unit of the bound count. Each click starts a task that
/// never finishes on its own.
#[derive(Clone)]
struct Toolbar {
    count: Binding<i32>,
    dropped: Rc<Cell<bool>>,
}

impl View for Toolbar {
    fn layout_policy(&self) -> LayoutPolicy {
        LayoutPolicy::Stack(StackLayout::horizontal())
    }

    fn content(&self, _declared: &[Child], _env: &Environment) -> Vec<Child> {
        (0..self.count.get())
            .map(|_| {
                let dropped = Rc::clone(&self.dropped);
                let action = Action::spawn(move || {
                    let guard = DropFlag(Rc::clone(&dropped));
                    async move {
                        let _guard = guard;
                        std::future::pending::<()>().await;
                        Ok::<(), ActionError>(())
                    }
                });
                Child::from(Button::new().action(action).label("go"))
            })
            .collect()
    }
}

fn toolbar(count: &Binding<i32>, dropped: &Rc<Cell<bool>>) -> Ui {
    let view = Toolbar {
        count: count.clone(),
        dropped: Rc::clone(dropped),
    };
    let root = ViewNode::new(view).bind("count", count);
    let mut ui = Ui::new(root, Rect::new(0, 0, 100, 20)).unwrap();
    ui.sync().unwrap();
    ui
}

fn shift_tab() -> Event {
    Event::KeyDown {
        key: Key::Tab,
        mods: Modifiers::SHIFT,
    }
}

// ============================================================================
// HIT TESTING
// ============================================================================

#[test]
fn test_later_sibling_wins_overlap() {
    let root = ViewNode::new(Panel).children([
        ViewNode::new(Target(Size::new(20, 20))),
        ViewNode::new(Target(Size::new(20, 20))),
    ]);
    let mut tree = ViewTree::new(root);
    let root = tree.root();
    tree.layout(root, Rect::new(0, 0, 100, 100)).unwrap();
    let [back, front] = [tree.subviews(root)[0], tree.subviews(root)[1]];

    let filters = Filter::enabled_interactive();
    assert_eq!(tree.find(root, Point::new(50, 50), &filters), Some(front));
    assert_ne!(tree.find(root, Point::new(50, 50), &filters), Some(back));
    assert_eq!(tree.find(root, Point::new(5, 5), &filters), None);
}

#[test]
fn test_disabled_front_node_lets_back_node_through() {
    let root = ViewNode::new(Panel).children([
        ViewNode::new(Target(Size::new(20, 20))),
        ViewNode::new(Target(Size::new(20, 20))).disabled(true),
    ]);
    let mut tree = ViewTree::new(root);
    let root = tree.root();
    tree.layout(root, Rect::new(0, 0, 100, 100)).unwrap();

    let hit = tree.find(root, Point::new(50, 50), &Filter::enabled_interactive());
    assert_eq!(hit, Some(tree.subviews(root)[0]));
}

#[test]
fn test_find_is_innermost_find_all_is_outermost_first() {
    let root = ViewNode::new(Target(Size::ZERO)).child(
        ViewNode::new(Target(Size::ZERO))
            .padding(Insets::all(5))
            .child(ViewNode::new(Target(Size::new(10, 10)))),
    );
    let mut tree = ViewTree::new(root);
    let root = tree.root();
    tree.layout(root, Rect::new(0, 0, 100, 100)).unwrap();
    let mid = tree.subviews(root)[0];
    let leaf = tree.subviews(mid)[0];

    // mid spans 40..60, leaf 45..55
    let filters = [Filter::Interactive(true)];
    assert_eq!(tree.find(root, Point::new(50, 50), &filters), Some(leaf));
    assert_eq!(tree.find(root, Point::new(41, 41), &filters), Some(mid));
    assert_eq!(tree.find_all(root, &filters), vec![root, mid, leaf]);
}

// ============================================================================
// FOCUS
// ============================================================================

#[test]
fn test_tab_cycles_enabled_nodes_in_order() {
    let root = hstack([
        Button::new().label("a"),
        Button::new().label("b").disabled(true),
        Button::new().label("c"),
    ]);
    let mut ui = Ui::new(root, Rect::new(0, 0, 100, 20)).unwrap();
    ui.sync().unwrap();
    let root = ui.tree().root();
    let first = ui.tree().subviews(root)[0];
    let last = ui.tree().subviews(root)[2];

    assert!(ui.dispatch(&Event::key(Key::Tab)).unwrap());
    assert_eq!(ui.focused(), Some(first));
    ui.dispatch(&Event::key(Key::Tab)).unwrap();
    assert_eq!(ui.focused(), Some(last));
    ui.dispatch(&Event::key(Key::Tab)).unwrap();
    assert_eq!(ui.focused(), Some(first));
    ui.dispatch(&shift_tab()).unwrap();
    assert_eq!(ui.focused(), Some(last));

    assert!(ui.tree().node(last).unwrap().is_focused());
    assert!(!ui.tree().node(first).unwrap().is_focused());
}

#[test]
fn test_tab_without_candidates_is_unhandled() {
    let mut ui = Ui::new(ViewNode::new(Panel), Rect::new(0, 0, 10, 10)).unwrap();
    ui.sync().unwrap();

    assert!(!ui.dispatch(&Event::key(Key::Tab)).unwrap());
    assert_eq!(ui.focused(), None);
}

#[test]
fn test_focus_follows_rebuilt_node() {
    let count = Binding::new(1);
    let dropped = Rc::new(Cell::new(false));
    let mut ui = toolbar(&count, &dropped);

    ui.dispatch(&Event::key(Key::Tab)).unwrap();
    let before = ui.focused().unwrap();

    count.set(2);
    ui.sync().unwrap();

    let after = ui.focused().unwrap();
    assert_ne!(before, after);
    assert!(!ui.tree().contains(before));
    assert_eq!(ui.tree().node(after).unwrap().type_name(), "Button");

    ui.dispatch(&Event::key(Key::Space)).unwrap();
    assert!(ui.tree().node(after).unwrap().is_focused());
}

#[test]
fn test_sync_moves_focus_flag_to_rebuilt_node() {
    let count = Binding::new(1);
    let dropped = Rc::new(Cell::new(false));
    let mut ui = toolbar(&count, &dropped);
    ui.dispatch(&Event::key(Key::Tab)).unwrap();

    count.set(2);
    ui.sync().unwrap();

    let root = ui.tree().root();
    let focused = ui.tree().find_all(root, &[Filter::Focused(true)]);
    assert_eq!(focused, vec![ui.focused().unwrap()]);
}

#[test]
fn test_rebuild_through_ui_keeps_focus_flag() {
    let count = Binding::new(1);
    let dropped = Rc::new(Cell::new(false));
    let mut ui = toolbar(&count, &dropped);
    ui.dispatch(&Event::key(Key::Tab)).unwrap();
    let before = ui.focused().unwrap();

    let root = ui.tree().root();
    let discarded = ui.rebuild(root).unwrap();
    assert!(discarded.contains(&before));

    let after = ui.focused().unwrap();
    assert_ne!(before, after);
    assert!(ui.tree().node(after).unwrap().is_focused());
    assert!(ui.tree().is_dirty());
}

#[test]
fn test_focus_lapses_when_node_disappears() {
    let count = Binding::new(1);
    let dropped = Rc::new(Cell::new(false));
    let mut ui = toolbar(&count, &dropped);
    ui.dispatch(&Event::key(Key::Tab)).unwrap();

    count.set(0);
    ui.sync().unwrap();

    assert_eq!(ui.focused(), None);
    assert!(!ui.dispatch(&Event::key(Key::Space)).unwrap());
}

#[test]
fn test_press_on_empty_space_clears_focus() {
    let count = Binding::new(1);
    let dropped = Rc::new(Cell::new(false));
    let mut ui = toolbar(&count, &dropped);
    ui.dispatch(&Event::key(Key::Tab)).unwrap();
    assert!(ui.focused().is_some());

    assert!(!ui.dispatch(&Event::MouseDown(Point::new(1, 1))).unwrap());
    assert_eq!(ui.focused(), None);
}

// ============================================================================
// TASKS
// ============================================================================

#[test]
fn test_discarded_owner_aborts_its_task() {
    let count = Binding::new(1);
    let dropped = Rc::new(Cell::new(false));
    let mut ui = toolbar(&count, &dropped);

    // one 14x14 button centered in 100x20
    ui.dispatch(&Event::MouseDown(Point::new(50, 10))).unwrap();
    ui.dispatch(&Event::MouseUp(Point::new(50, 10))).unwrap();
    ui.sync().unwrap();
    assert_eq!(ui.tasks().pending(), 1);
    assert!(!dropped.get());

    count.set(2);
    ui.sync().unwrap();
    assert_eq!(ui.tasks().pending(), 0);

    ui.sync().unwrap();
    assert!(dropped.get());
}

#[test]
fn test_task_of_surviving_owner_keeps_running() {
    let count = Binding::new(1);
    let dropped = Rc::new(Cell::new(false));
    let mut ui = toolbar(&count, &dropped);

    ui.dispatch(&Event::MouseDown(Point::new(50, 10))).unwrap();
    ui.dispatch(&Event::MouseUp(Point::new(50, 10))).unwrap();
    ui.resize(Rect::new(0, 0, 200, 40));
    ui.sync().unwrap();

    assert_eq!(ui.tasks().pending(), 1);
    assert!(!dropped.get());
}

#[test]
fn test_rebuild_through_ui_aborts_discarded_tasks() {
    let count = Binding::new(1);
    let dropped = Rc::new(Cell::new(false));
    let mut ui = toolbar(&count, &dropped);

    ui.dispatch(&Event::MouseDown(Point::new(50, 10))).unwrap();
    ui.dispatch(&Event::MouseUp(Point::new(50, 10))).unwrap();
    ui.sync().unwrap();
    assert_eq!(ui.tasks().pending(), 1);

    let root = ui.tree().root();
    ui.rebuild(root).unwrap();
    assert_eq!(ui.tasks().pending(), 0);

    ui.sync().unwrap();
    assert!(dropped.get());
    assert!(!ui.tree().is_dirty());
}
