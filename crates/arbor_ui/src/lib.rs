//! # Arbor UI
//!
//! Declarative, retained-mode view tree:
//! - Application code declares `ViewNode`s; the reconciler turns the
//!   declaration into a live tree
//! - Two-pass layout with per-node padding and border
//! - Depth-first rendering through an external `Renderer`
//! - Hit testing, focus and pointer tracking
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       FRAME PIPELINE                      │
//! ├──────────────────────────────────────────────────────────┤
//! │  Tasks → Invalidations → Reconcile → Layout → Render      │
//! │    ↑           ↑                                          │
//! │  Actions   Bound values  ←  Event Router  ←  Input        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//!
//! The `ViewTree` arena owns every live node. A node's `parent` is a plain
//! `NodeId`; nothing points back into the tree with an owning reference.
//! Environments are copied downward, never shared mutably.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod action;
pub mod config;
pub mod env;
pub mod error;
pub mod event;
pub mod input;
pub mod invalidate;
pub mod layout;
pub mod node;
pub mod reconcile;
pub mod render;
pub mod router;
pub mod task;
pub mod tree;
pub mod ui;
pub mod view;
pub mod widget;

#[cfg(test)]
mod testing;

pub use action::{Action, ActionFuture};
pub use config::{parse_options, NodeConfig};
pub use env::{Asset, EnvOverrides, Environment, FixedFont, Font, StaticTheme, Theme};
pub use error::{ActionError, ConfigError, ViewError, ViewResult};
pub use event::{EventCx, Filter};
pub use input::{Event, Key, Modifiers};
pub use invalidate::Invalidation;
pub use layout::{Alignment, LayoutPolicy, StackLayout};
pub use node::{Child, DynamicChild, ForEach, NodeFlags, Priority, ViewNode};
pub use render::{DrawCommand, DrawList, Renderer};
pub use router::EventRouter;
pub use task::TaskQueue;
pub use tree::{ChildKey, NodeId, TreeStats, ViewTree};
pub use ui::Ui;
pub use view::{DrawCx, View, ViewObject};

pub use arbor_core::{Axis, Binding, Color, Insets, Point, Rect, Size, Subscription};
