//! View nodes and declared children.
//!
//! A `ViewNode` starts life as a declaration built by application code: a
//! boxed `View`, its declared `contents`, typed configuration and bindings.
//! Once the reconciler attaches it to a `ViewTree` it also carries live
//! state (hierarchy links, geometry, environment, flags). Cloning a node
//! copies the declaration only.

use std::any::{Any, type_name};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use arbor_core::{Binding, Color, Insets, Rect, Subscription};
use crossbeam_channel::Sender;
use serde::Deserialize;

use crate::config::NodeConfig;
use crate::env::{EnvOverrides, Environment};
use crate::error::{ConfigError, ViewError};
use crate::invalidate::Invalidation;
use crate::tree::NodeId;
use crate::view::View;

/// Node state flags (bitfield).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeFlags(u32);

impl NodeFlags {
    /// Node needs a layout pass before the next render.
    pub const DIRTY: u32 = 1 << 0;
    /// Node ignores input.
    pub const DISABLED: u32 = 1 << 1;
    /// Node takes pointer and keyboard input.
    pub const INTERACTIVE: u32 = 1 << 2;
    /// Node holds keyboard focus.
    pub const FOCUSED: u32 = 1 << 3;

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets a flag.
    #[inline]
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clears a flag.
    #[inline]
    pub fn clear(&mut self, flag: u32) {
        self.0 &= !flag;
    }

    /// Sets or clears a flag.
    #[inline]
    pub fn assign(&mut self, flag: u32, on: bool) {
        if on {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }
}

/// Resolution tie-break weight. Carried, not consumed, by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// May be dropped.
    Optional,
    /// Low.
    Low,
    /// Normal.
    #[default]
    Normal,
    /// High.
    High,
}

type Attach = Rc<dyn Fn(NodeId, Sender<Invalidation>) -> Subscription>;

/// A binding declared on a node, subscribed when the node is attached.
#[derive(Clone)]
pub(crate) struct BindingSlot {
    pub(crate) name: Arc<str>,
    attach: Attach,
}

impl BindingSlot {
    pub(crate) fn attach(&self, node: NodeId, sender: Sender<Invalidation>) -> Subscription {
        (self.attach)(node, sender)
    }
}

/// Live state, written only by reconciliation, layout and routing.
#[derive(Default)]
pub(crate) struct NodeState {
    pub(crate) parent: Option<NodeId>,
    pub(crate) index: usize,
    pub(crate) subviews: Vec<NodeId>,
    pub(crate) frame: Rect,
    pub(crate) padding: Insets,
    pub(crate) border: Insets,
    pub(crate) env: Environment,
    pub(crate) flags: NodeFlags,
    pub(crate) subscriptions: Vec<Subscription>,
}

/// The tree's unit of composition.
pub struct ViewNode {
    pub(crate) view: Box<dyn View>,
    pub(crate) contents: Vec<Child>,
    pub(crate) config: NodeConfig,
    pub(crate) bindings: Vec<BindingSlot>,
    pub(crate) state: NodeState,
}

impl Clone for ViewNode {
    fn clone(&self) -> Self {
        Self {
            view: self.view.clone(),
            contents: self.contents.clone(),
            config: self.config.clone(),
            bindings: self.bindings.clone(),
            state: NodeState::default(),
        }
    }
}

impl ViewNode {
    /// Declares a node with the given behaviour and no children.
    pub fn new(view: impl View) -> Self {
        Self::from_box(Box::new(view))
    }

    /// Declares a node from an already boxed behaviour.
    #[must_use]
    pub fn from_box(view: Box<dyn View>) -> Self {
        Self {
            view,
            contents: Vec::new(),
            config: NodeConfig::default(),
            bindings: Vec::new(),
            state: NodeState::default(),
        }
    }

    // ---------------------------------------------------------------------
    // Declaration
    // ---------------------------------------------------------------------

    /// Appends one declared child.
    #[must_use]
    pub fn child(mut self, child: impl Into<Child>) -> Self {
        self.contents.push(child.into());
        self
    }

    /// Appends declared children in order.
    #[must_use]
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        self.contents.extend(children.into_iter().map(Into::into));
        self
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: NodeConfig) -> Self {
        self.config = config;
        self
    }

    /// Applies node options given as TOML, rejecting unknown attributes.
    ///
    /// Keys: `padding`, `border`, `background`, `disabled`, `priority`, `env`.
    pub fn options(mut self, options: &str) -> Result<Self, ConfigError> {
        self.config = NodeConfig::parse(self.view.type_name(), options)?;
        Ok(self)
    }

    /// Sets padding, in logical units scaled by the environment on attach.
    ///
    /// Negative sides are raised to zero.
    #[must_use]
    pub fn padding(mut self, padding: Insets) -> Self {
        self.config.padding = non_negative("padding", padding);
        self
    }

    /// Sets the border width, in logical units. Negative sides are raised
    /// to zero.
    #[must_use]
    pub fn border(mut self, border: Insets) -> Self {
        self.config.border = non_negative("border", border);
        self
    }

    /// Fills the frame with `color` before the widget draws.
    #[must_use]
    pub fn background(mut self, color: Color) -> Self {
        self.config.background = Some(color);
        self
    }

    /// Disables input for this node.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    /// Sets the resolution priority.
    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.config.priority = priority;
        self
    }

    /// Edits this node's environment overrides.
    #[must_use]
    pub fn with_env(mut self, f: impl FnOnce(&mut EnvOverrides)) -> Self {
        f(&mut self.config.env);
        self
    }

    /// Declares that this node owns `binding`: every change notifies the
    /// node as `state_changed(name, value)`, rebuilding its subtree.
    #[must_use]
    pub fn bind<T>(mut self, name: &str, binding: &Binding<T>) -> Self
    where
        T: Clone + PartialEq + Send + Sync + 'static,
    {
        let binding = binding.clone();
        let name: Arc<str> = Arc::from(name);
        let slot_name = Arc::clone(&name);
        let attach: Attach = Rc::new(move |node: NodeId, sender: Sender<Invalidation>| {
            let name = Arc::clone(&name);
            binding.subscribe(move |value: &T| {
                let invalidation = Invalidation {
                    node,
                    name: Arc::clone(&name),
                    value: Arc::new(value.clone()),
                };
                if sender.send(invalidation).is_err() {
                    tracing::warn!(%node, "invalidation dropped: tree is gone");
                }
            })
        });
        self.bindings.push(BindingSlot {
            name: slot_name,
            attach,
        });
        self
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// The behaviour.
    #[must_use]
    pub fn view(&self) -> &dyn View {
        self.view.as_ref()
    }

    /// Downcasts the behaviour to a concrete widget type.
    #[must_use]
    pub fn view_as<T: View>(&self) -> Option<&T> {
        self.view.as_any().downcast_ref::<T>()
    }

    /// Type name of the behaviour.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.view.type_name()
    }

    /// Stable view id: type name plus sibling index.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}-{}", self.type_name(), self.state.index)
    }

    /// Declared children.
    #[must_use]
    pub fn contents(&self) -> &[Child] {
        &self.contents
    }

    /// Declared configuration.
    #[must_use]
    pub fn configuration(&self) -> &NodeConfig {
        &self.config
    }

    /// Parent node, `None` for the root or a detached declaration.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.state.parent
    }

    /// Position among siblings.
    #[must_use]
    pub fn index(&self) -> usize {
        self.state.index
    }

    /// Live children, in order.
    #[must_use]
    pub fn subviews(&self) -> &[NodeId] {
        &self.state.subviews
    }

    /// Frame from the last layout pass; zero before the first.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.state.frame
    }

    /// Effective padding (scaled).
    #[must_use]
    pub fn padding_insets(&self) -> Insets {
        self.state.padding
    }

    /// Effective border (scaled).
    #[must_use]
    pub fn border_insets(&self) -> Insets {
        self.state.border
    }

    /// Frame minus padding and border.
    #[must_use]
    pub fn inner(&self) -> Rect {
        self.state.frame - (self.state.padding + self.state.border)
    }

    /// Inherited environment.
    #[must_use]
    pub fn env(&self) -> &Environment {
        &self.state.env
    }

    /// State flags.
    #[must_use]
    pub fn flags(&self) -> NodeFlags {
        self.state.flags
    }

    /// Needs re-layout.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.state.flags.has(NodeFlags::DIRTY)
    }

    /// Ignores input.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.state.flags.has(NodeFlags::DISABLED)
    }

    /// Takes input.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.state.flags.has(NodeFlags::INTERACTIVE)
    }

    /// Holds focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.state.flags.has(NodeFlags::FOCUSED)
    }

    /// Resolution priority.
    #[must_use]
    pub fn priority_level(&self) -> Priority {
        self.config.priority
    }
}

impl fmt::Debug for ViewNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewNode")
            .field("id", &self.id())
            .field("frame", &self.state.frame)
            .field("contents", &self.contents.len())
            .field("subviews", &self.state.subviews)
            .finish_non_exhaustive()
    }
}

/// A node yields itself.
impl IntoIterator for ViewNode {
    type Item = Self;
    type IntoIter = std::iter::Once<Self>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self)
    }
}

fn non_negative(attribute: &str, insets: Insets) -> Insets {
    if !insets.is_non_negative() {
        tracing::warn!(attribute, ?insets, "negative insets raised to zero");
    }
    insets.clamped()
}

/// A declared child: expands to zero or more live nodes on reconciliation.
#[derive(Clone)]
pub enum Child {
    /// A single node.
    Node(ViewNode),
    /// One or more nodes per backing item.
    Each(ForEach),
    /// A type-erased value, validated when expanded.
    Dynamic(DynamicChild),
}

impl Child {
    /// Wraps an arbitrary value. Expansion accepts a `ViewNode`, `ForEach`
    /// or `Child`; anything else is a malformed tree.
    pub fn dynamic<T: Any>(value: T) -> Self {
        Self::Dynamic(DynamicChild {
            type_name: type_name::<T>(),
            value: Rc::new(value),
        })
    }

    /// Appends the nodes this child expands to.
    pub(crate) fn expand_into(&self, out: &mut Vec<ViewNode>) -> Result<(), ViewError> {
        match self {
            Self::Node(node) => {
                out.push(node.clone());
                Ok(())
            }
            Self::Each(each) => {
                for child in (each.expand)() {
                    child.expand_into(out)?;
                }
                Ok(())
            }
            Self::Dynamic(dynamic) => dynamic.expand_into(out),
        }
    }
}

impl From<ViewNode> for Child {
    fn from(node: ViewNode) -> Self {
        Self::Node(node)
    }
}

impl From<ForEach> for Child {
    fn from(each: ForEach) -> Self {
        Self::Each(each)
    }
}

impl fmt::Debug for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node) => f.debug_tuple("Node").field(&node.type_name()).finish(),
            Self::Each(_) => f.write_str("Each"),
            Self::Dynamic(d) => f.debug_tuple("Dynamic").field(&d.type_name).finish(),
        }
    }
}

/// A type-erased declared child.
#[derive(Clone)]
pub struct DynamicChild {
    type_name: &'static str,
    value: Rc<dyn Any>,
}

impl DynamicChild {
    fn expand_into(&self, out: &mut Vec<ViewNode>) -> Result<(), ViewError> {
        let value = self.value.as_ref();
        if let Some(node) = value.downcast_ref::<ViewNode>() {
            out.push(node.clone());
            Ok(())
        } else if let Some(each) = value.downcast_ref::<ForEach>() {
            Child::Each(each.clone()).expand_into(out)
        } else if let Some(child) = value.downcast_ref::<Child>() {
            child.expand_into(out)
        } else {
            Err(ViewError::MalformedTree {
                type_name: self.type_name,
            })
        }
    }
}

/// Repeating node: calls a builder once per item of a backing collection.
#[derive(Clone)]
pub struct ForEach {
    expand: Rc<dyn Fn() -> Vec<Child>>,
}

impl ForEach {
    /// Repeats over a fixed list of items.
    pub fn new<T, F, I>(items: Vec<T>, builder: F) -> Self
    where
        T: 'static,
        F: Fn(&T) -> I + 'static,
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        Self {
            expand: Rc::new(move || {
                items
                    .iter()
                    .flat_map(|item| builder(item).into_iter().map(Into::<Child>::into))
                    .collect::<Vec<Child>>()
            }),
        }
    }

    /// Repeats over the current contents of a bound list, read at each
    /// reconciliation.
    pub fn bound<T, F, I>(items: Binding<Vec<T>>, builder: F) -> Self
    where
        T: Clone + PartialEq + Send + Sync + 'static,
        F: Fn(&T) -> I + 'static,
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        Self {
            expand: Rc::new(move || {
                items.with(|items| {
                    items
                        .iter()
                        .flat_map(|item| builder(item).into_iter().map(Into::<Child>::into))
                        .collect::<Vec<Child>>()
                })
            }),
        }
    }
}

impl fmt::Debug for ForEach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForEach").finish_non_exhaustive()
    }
}
