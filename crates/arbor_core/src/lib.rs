//! # Arbor Core
//!
//! Value types shared by every layer of the arbor UI tree:
//! - Integer geometry (`Point`, `Size`, `Rect`, `Insets`, `Axis`)
//! - RGBA `Color`
//! - `Binding<T>`, the observable cell views are bound to
//!
//! Nothing in this crate knows about views; the UI crate builds the tree,
//! layout and event routing on top of these types.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod binding;
pub mod color;
pub mod geom;

pub use binding::{Binding, Subscription};
pub use color::Color;
pub use geom::{Axis, Insets, Point, Rect, Size};
