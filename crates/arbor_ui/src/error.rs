//! # View Error Types
//!
//! All errors that can occur while building, configuring or driving the
//! view tree. A lookup that finds nothing is `None`, never an error.

use thiserror::Error;

use crate::tree::NodeId;

/// Errors raised by the tree engine.
#[derive(Error, Debug)]
pub enum ViewError {
    /// A declared child expanded to something that is not a view.
    ///
    /// Raised during reconciliation; nothing of the new subtree is installed.
    #[error("malformed tree: declared child expanded to `{type_name}`, which is not a view")]
    MalformedTree {
        /// Runtime type of the offending value.
        type_name: &'static str,
    },

    /// The node is not (or no longer) part of the tree.
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// The task runtime for detached actions could not be created.
    #[error("task runtime unavailable: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Errors raised while applying construction-time options.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The options named an attribute this view kind does not have.
    #[error("unknown attribute `{name}` for {view}")]
    UnknownAttribute {
        /// View kind being configured.
        view: &'static str,
        /// The rejected key.
        name: String,
    },

    /// The options were not valid TOML or a value had the wrong shape.
    #[error("invalid options for {view}: {source}")]
    Invalid {
        /// View kind being configured.
        view: &'static str,
        /// Underlying parse failure.
        #[source]
        source: toml::de::Error,
    },
}

/// Failure reported by a user action.
///
/// Action failures stay local to the dispatch that fired them: they are
/// logged and never reach layout or rendering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("action failed: {0}")]
pub struct ActionError(pub String);

impl ActionError {
    /// Creates an error from any displayable message.
    pub fn msg(message: impl std::fmt::Display) -> Self {
        Self(message.to_string())
    }
}

/// Result type for tree operations.
pub type ViewResult<T> = Result<T, ViewError>;
