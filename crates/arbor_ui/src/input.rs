//! Input events delivered to the tree.

#![allow(missing_docs)]

use arbor_core::Point;

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Tab key.
    Tab,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Space bar.
    Space,
    /// A printable key.
    Char(char),
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Control key is held.
    pub ctrl: bool,
    /// Alt key is held.
    pub alt: bool,
    /// Super/Command key is held.
    pub super_key: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        super_key: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };
}

/// One input event from the windowing layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    MouseDown(Point),
    MouseMotion(Point),
    MouseUp(Point),
    KeyDown { key: Key, mods: Modifiers },
    KeyUp { key: Key, mods: Modifiers },
    TextInput(String),
}

impl Event {
    /// Pointer position for mouse events.
    #[must_use]
    pub fn point(&self) -> Option<Point> {
        match self {
            Self::MouseDown(pt) | Self::MouseMotion(pt) | Self::MouseUp(pt) => Some(*pt),
            _ => None,
        }
    }

    /// Key press without modifiers.
    #[must_use]
    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            mods: Modifiers::NONE,
        }
    }
}
