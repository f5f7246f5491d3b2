//! The task manager: the uniform wrapper around every dispatched operation.
//!
//! [`TaskManager::execute`] is the fault-isolation boundary of the server.
//! It creates a lifecycle record for each invocation, acquires the
//! category's concurrency slot within a bounded wait, runs the handler,
//! records the outcome, and returns a result tagged with the task ID.
//! Nothing escapes it as an error: slot timeouts, handler failures, and
//! cancellation races all come back as ordinary tagged results, and the
//! slot is released on every path.
//!
//! Cancellation is cooperative and best-effort. The flag is observed before
//! dispatch and after the handler returns; an in-flight handler is never
//! interrupted. A task cancelled mid-flight is reported `cancelled` even
//! though its handler runs to completion -- the late outcome is discarded.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::TaskConfig;
use crate::error::TaskError;
use crate::handler::ToolHandler;
use crate::limiter::CategoryLimiter;
use crate::output::ToolOutput;
use crate::record::{TaskRecord, TaskStatus, TaskSummary};
use crate::store::TaskStore;

/// Orchestrates task creation, concurrency limiting, execution, and
/// outcome recording.
///
/// Construct one per process and share it by `Arc` with the dispatch
/// surface; all methods take `&self`.
///
/// # Examples
///
/// ```
/// use remotectl_tasks::TaskManager;
///
/// let manager = TaskManager::new();
/// assert!(manager.task_status("missing").is_none());
/// assert!(manager.recent_tasks(None).is_empty());
/// ```
#[derive(Debug)]
pub struct TaskManager {
    store: TaskStore,
    limiter: CategoryLimiter,
    acquire_timeout: Duration,
}

impl TaskManager {
    /// Creates a manager with default configuration.
    pub fn new() -> Self {
        Self::with_config(TaskConfig::default())
    }

    /// Creates a manager with the given configuration.
    pub fn with_config(config: TaskConfig) -> Self {
        Self {
            store: TaskStore::new(&config),
            limiter: CategoryLimiter::new(&config),
            acquire_timeout: config.acquire_timeout,
        }
    }

    /// Direct access to the task store, for tests and diagnostics.
    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Executes `operation` through the full lifecycle wrapper.
    ///
    /// The returned output always carries the task's ID, for every outcome:
    ///
    /// - success: the handler's output, tagged;
    /// - slot timeout: `[task:<id>] Error: timeout waiting for <category>
    ///   lock (...)`, the handler never runs;
    /// - handler failure: `[task:<id>] Error in <operation>: <error>`, with
    ///   the failure logged and absorbed;
    /// - cancellation observed before or after the handler:
    ///   `[task:<id>] Cancelled before execution` / `... during execution`.
    pub async fn execute(&self, operation: &str, handler: &dyn ToolHandler, args: Value) -> ToolOutput {
        let task = self.store.create(operation);
        let task_id = task.id.clone();
        debug!(operation = %operation, task_id = %task_id, category = %task.category, "task created");

        let _permit = match self.limiter.acquire(task.category, self.acquire_timeout).await {
            Ok(permit) => permit,
            Err(err) => {
                warn!(operation = %operation, task_id = %task_id, "no concurrency slot: {err}");
                self.store.fail(&task_id, err.to_string());
                return ToolOutput::text(format!("Error: {err}")).tagged(&task_id);
            }
        };

        // Cancelled while waiting for the slot: the record is already
        // terminal, so skip the handler entirely.
        if self.store.cancel_requested(&task_id) {
            return ToolOutput::text("Cancelled before execution").tagged(&task_id);
        }

        self.store.mark_running(&task_id);
        let outcome = handler.handle(args).await;

        // Cancelled mid-flight: the record stays cancelled and the
        // handler's outcome, success or failure, is discarded.
        if self.store.cancel_requested(&task_id) {
            return ToolOutput::text("Cancelled during execution").tagged(&task_id);
        }

        match outcome {
            Ok(output) => {
                self.store.complete(&task_id, output.summary_text());
                debug!(operation = %operation, task_id = %task_id, "task completed");
                output.tagged(&task_id)
            }
            Err(err) => {
                error!(
                    operation = %operation,
                    task_id = %task_id,
                    "tool failed: {err:?}"
                );
                self.store.fail(&task_id, err.to_string());
                ToolOutput::text(format!("Error in {operation}: {err}")).tagged(&task_id)
            }
        }
    }

    /// Summary of one task, or `None` for an unknown ID.
    pub fn task_status(&self, task_id: &str) -> Option<TaskSummary> {
        self.store.get(task_id).map(|record| record.summary())
    }

    /// Recent task summaries, newest first, optionally filtered by status.
    pub fn recent_tasks(&self, filter: Option<TaskStatus>) -> Vec<TaskSummary> {
        self.store.list(filter)
    }

    /// Running and pending task summaries, running first.
    pub fn active_tasks(&self) -> Vec<TaskSummary> {
        let mut active = self.store.list(Some(TaskStatus::Running));
        active.extend(self.store.list(Some(TaskStatus::Pending)));
        active
    }

    /// Requests cancellation of a task. See [`TaskStore::cancel`].
    ///
    /// # Errors
    ///
    /// - [`TaskError::NotFound`] for an unknown ID.
    /// - [`TaskError::AlreadyTerminal`] if the task already reached a
    ///   terminal state.
    pub fn cancel(&self, task_id: &str) -> Result<TaskRecord, TaskError> {
        self.store.cancel(task_id)
    }
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}
