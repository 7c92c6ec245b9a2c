//! Detached task queue.
//!
//! Async actions run on a single-threaded tokio runtime driven between
//! frames. Dispatch only spawns; nothing on the event path ever waits for
//! a task to finish. Every task is owned by the node that fired it and is
//! aborted when reconciliation discards that node.

use std::fmt;
use std::future::Future;

use tokio::runtime::{Builder, Runtime};
use tokio::task::{JoinHandle, LocalSet};

use crate::error::{ActionError, ViewResult};
use crate::tree::NodeId;

/// Upper bound on scheduler ticks per `run_until_stalled` call.
const MAX_TICKS: usize = 64;

/// Single-threaded queue of detached action tasks.
pub struct TaskQueue {
    runtime: Runtime,
    local: LocalSet,
    handles: Vec<(NodeId, JoinHandle<()>)>,
}

impl TaskQueue {
    /// Creates a queue with its own current-thread runtime.
    pub fn new() -> ViewResult<Self> {
        let runtime = Builder::new_current_thread().enable_time().build()?;
        Ok(Self {
            runtime,
            local: LocalSet::new(),
            handles: Vec::new(),
        })
    }

    /// Schedules `task` on behalf of `owner` without running it.
    ///
    /// A failed task is logged and otherwise ignored.
    pub fn spawn<F>(&mut self, owner: NodeId, task: F)
    where
        F: Future<Output = Result<(), ActionError>> + 'static,
    {
        let handle = self.local.spawn_local(async move {
            if let Err(err) = task.await {
                tracing::warn!(node = %owner, error = %err, "async action failed");
            }
        });
        self.handles.push((owner, handle));
    }

    /// Polls scheduled tasks until all have finished or none can make
    /// progress without waiting. Never blocks on a pending timer.
    pub fn run_until_stalled(&mut self) {
        let Self {
            runtime,
            local,
            handles,
        } = self;

        runtime.block_on(local.run_until(async {
            for _ in 0..MAX_TICKS {
                tokio::task::yield_now().await;
                if handles.iter().all(|(_, handle)| handle.is_finished()) {
                    break;
                }
            }
        }));
        handles.retain(|(_, handle)| !handle.is_finished());
    }

    /// Aborts every task owned by one of `nodes`. Returns how many were
    /// aborted.
    pub fn cancel_owned_by(&mut self, nodes: &[NodeId]) -> usize {
        let before = self.handles.len();
        self.handles.retain(|(owner, handle)| {
            if nodes.contains(owner) {
                handle.abort();
                false
            } else {
                true
            }
        });
        let cancelled = before - self.handles.len();
        if cancelled > 0 {
            tracing::debug!(cancelled, "aborted tasks of discarded nodes");
        }
        cancelled
    }

    /// Number of tasks not yet finished.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.handles
            .iter()
            .filter(|(_, handle)| !handle.is_finished())
            .count()
    }
}

impl fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskQueue")
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}
