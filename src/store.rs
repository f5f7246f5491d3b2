//! Thread-safe task store with bounded-history eviction.
//!
//! [`TaskStore`] owns every [`TaskRecord`] behind a single mutex, which
//! makes `create`/`get`/`list`/`cancel` and eviction atomic relative to
//! each other. Records in terminal states are capped at a configured
//! maximum; when the cap is exceeded, the oldest terminal records (by
//! `created_at`) are evicted first. Non-terminal records are never evicted.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::debug;

use crate::config::TaskConfig;
use crate::error::TaskError;
use crate::record::{TaskRecord, TaskStatus, TaskSummary};

/// In-memory mapping of task ID to [`TaskRecord`].
///
/// All state is process-local and lost on restart. Safe to share across
/// tasks behind an `Arc` (all mutation goes through `&self`).
#[derive(Debug)]
pub struct TaskStore {
    tasks: Mutex<HashMap<String, TaskRecord>>,
    max_history: usize,
    list_limit: usize,
}

impl TaskStore {
    /// Creates a store with the given history and list caps.
    pub fn new(config: &TaskConfig) -> Self {
        Self {
            tasks: Mutex::new(HashMap::new()),
            max_history: config.max_history,
            list_limit: config.list_limit,
        }
    }

    /// Allocates and inserts a new `Pending` record for `operation`.
    ///
    /// Runs the eviction check while holding the lock. Returns a clone of
    /// the inserted record.
    pub fn create(&self, operation: &str) -> TaskRecord {
        let record = TaskRecord::new(operation);
        let mut tasks = self.tasks.lock();
        tasks.insert(record.id.clone(), record.clone());
        self.evict_locked(&mut tasks);
        record
    }

    /// Returns a snapshot of the record, or `None` for an unknown ID.
    pub fn get(&self, task_id: &str) -> Option<TaskRecord> {
        self.tasks.lock().get(task_id).cloned()
    }

    /// Lists task summaries, newest `created_at` first, optionally filtered
    /// by status, capped at the configured list limit.
    pub fn list(&self, filter: Option<TaskStatus>) -> Vec<TaskSummary> {
        let mut records: Vec<TaskRecord> = {
            let tasks = self.tasks.lock();
            tasks
                .values()
                .filter(|t| filter.is_none_or(|status| t.status == status))
                .cloned()
                .collect()
        };
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(self.list_limit);
        records.iter().map(TaskRecord::summary).collect()
    }

    /// Requests cancellation of a task.
    ///
    /// A `Pending` or `Running` record transitions to `Cancelled`
    /// immediately and a snapshot of it is returned. The transition is
    /// eager: a handler that is already executing keeps running, and its
    /// eventual outcome is discarded because the record is terminal.
    ///
    /// # Errors
    ///
    /// - [`TaskError::NotFound`] for an unknown ID.
    /// - [`TaskError::AlreadyTerminal`] if the task already reached a
    ///   terminal state.
    pub fn cancel(&self, task_id: &str) -> Result<TaskRecord, TaskError> {
        let mut tasks = self.tasks.lock();
        let Some(record) = tasks.get_mut(task_id) else {
            return Err(TaskError::NotFound {
                task_id: task_id.to_string(),
            });
        };
        if record.cancel() {
            debug!(task_id = %task_id, operation = %record.operation, "task cancelled");
            let cancelled = record.clone();
            self.evict_locked(&mut tasks);
            Ok(cancelled)
        } else {
            Err(TaskError::AlreadyTerminal {
                task_id: task_id.to_string(),
                status: record.status,
            })
        }
    }

    /// Whether cancellation has been requested for the task.
    ///
    /// Unknown IDs read as not-cancelled; the manager only asks about
    /// records it created, and eviction never removes non-terminal records.
    pub(crate) fn cancel_requested(&self, task_id: &str) -> bool {
        self.tasks
            .lock()
            .get(task_id)
            .is_some_and(|t| t.cancel_requested)
    }

    /// Transitions a record to `Running`. No-op on terminal records.
    pub(crate) fn mark_running(&self, task_id: &str) {
        if let Some(record) = self.tasks.lock().get_mut(task_id) {
            record.mark_running();
        }
    }

    /// Records a successful outcome. No-op on terminal records.
    pub(crate) fn complete(&self, task_id: &str, result: String) {
        let mut tasks = self.tasks.lock();
        if let Some(record) = tasks.get_mut(task_id) {
            record.complete(result);
        }
        self.evict_locked(&mut tasks);
    }

    /// Records a failure. No-op on terminal records.
    pub(crate) fn fail(&self, task_id: &str, error: String) {
        let mut tasks = self.tasks.lock();
        if let Some(record) = tasks.get_mut(task_id) {
            record.fail(error);
        }
        self.evict_locked(&mut tasks);
    }

    /// Evicts the oldest terminal records beyond `max_history`.
    ///
    /// Must be called with the lock held. Non-terminal records are never
    /// candidates, so an arbitrary number of in-flight tasks survives any
    /// history pressure.
    fn evict_locked(&self, tasks: &mut HashMap<String, TaskRecord>) {
        let terminal = tasks.values().filter(|t| t.status.is_terminal()).count();
        if terminal <= self.max_history {
            return;
        }

        let mut victims: Vec<(chrono::DateTime<chrono::Utc>, String)> = tasks
            .values()
            .filter(|t| t.status.is_terminal())
            .map(|t| (t.created_at, t.id.clone()))
            .collect();
        victims.sort_by(|a, b| a.0.cmp(&b.0));

        let excess = terminal - self.max_history;
        for (_, id) in victims.into_iter().take(excess) {
            tasks.remove(&id);
        }
        debug!(evicted = excess, "trimmed task history");
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.tasks.lock().len()
    }
}
