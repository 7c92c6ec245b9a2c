//! User actions fired by widgets.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use crate::error::ActionError;
use crate::task::TaskQueue;
use crate::tree::NodeId;

/// Future produced by an async action.
pub type ActionFuture = Pin<Box<dyn Future<Output = Result<(), ActionError>>>>;

/// A procedure a widget runs in response to input.
///
/// The caller chooses the variant when declaring the widget; dispatch
/// never inspects the procedure to decide how to run it.
#[derive(Clone)]
pub enum Action {
    /// Runs to completion inside the dispatch.
    Sync(Rc<dyn Fn() -> Result<(), ActionError>>),
    /// Produces a task that is detached onto the task queue.
    Async(Rc<dyn Fn() -> ActionFuture>),
}

impl Action {
    /// A synchronous action.
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn() -> Result<(), ActionError> + 'static,
    {
        Self::Sync(Rc::new(f))
    }

    /// An async action; each firing spawns a new detached task.
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<(), ActionError>> + 'static,
    {
        Self::Async(Rc::new(move || Box::pin(f()) as ActionFuture))
    }

    /// Runs or schedules the action on behalf of `owner`.
    ///
    /// Sync failures are logged here; async failures when the task ends.
    pub fn fire(&self, owner: NodeId, tasks: &mut TaskQueue) {
        match self {
            Self::Sync(f) => {
                if let Err(err) = f() {
                    tracing::warn!(node = %owner, error = %err, "action failed");
                }
            }
            Self::Async(f) => tasks.spawn(owner, f()),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(_) => f.write_str("Action::Sync"),
            Self::Async(_) => f.write_str("Action::Async"),
        }
    }
}
