//! Task record -- the lifecycle state of one operation invocation.
//!
//! A [`TaskRecord`] is created by the manager immediately before dispatch
//! and mutated only through its transition methods, which enforce the
//! status state machine: terminal records reject every further transition.
//! That discipline is what makes eager cancellation stick -- a handler that
//! finishes after its record was cancelled cannot overwrite the outcome.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::Category;
use crate::constants::TASK_ID_LEN;

/// Task lifecycle status.
///
/// # State Machine
///
/// ```text
/// Pending -> Running, Cancelled, Failed
/// Running -> Completed, Failed, Cancelled
/// Completed / Failed / Cancelled -> (terminal, no transitions)
/// ```
///
/// `Pending -> Failed` covers the slot-timeout path, where the task fails
/// before it ever starts running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created, waiting for a concurrency slot.
    Pending,
    /// Handler is executing.
    Running,
    /// Handler returned successfully (terminal).
    Completed,
    /// Slot timeout or handler failure (terminal).
    Failed,
    /// Cancellation was requested before a terminal outcome (terminal).
    Cancelled,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl TaskStatus {
    /// Returns `true` for `Completed`, `Failed`, and `Cancelled`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// The lifecycle record of one operation invocation.
///
/// Records are never destroyed individually; they leave the store only via
/// bounded-history eviction. The `cancel_requested` flag is observed
/// cooperatively -- setting it does not interrupt a running handler.
#[derive(Debug, Clone)]
pub struct TaskRecord {
    /// Unique ID, stable for the record's lifetime: 12 hex chars.
    pub id: String,
    /// The invoked operation name.
    pub operation: String,
    /// Category resolved from the registry at creation time.
    pub category: Category,
    /// Current lifecycle status.
    pub status: TaskStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// Set on the transition to `Running`; `None` before that.
    pub started_at: Option<DateTime<Utc>>,
    /// Set on the transition to a terminal state; `None` before that.
    pub completed_at: Option<DateTime<Utc>>,
    /// Rendered success payload, set on `Completed`.
    pub result: Option<String>,
    /// Failure message, set on `Failed`.
    pub error: Option<String>,
    /// Cooperative cancellation flag.
    pub cancel_requested: bool,
}

impl TaskRecord {
    /// Creates a new `Pending` record for `operation`.
    ///
    /// Generates a fresh 12-hex-char ID and resolves the category via
    /// [`Category::for_operation`].
    ///
    /// # Examples
    ///
    /// ```
    /// use remotectl_tasks::{Category, TaskRecord, TaskStatus};
    ///
    /// let record = TaskRecord::new("Click");
    /// assert_eq!(record.id.len(), 12);
    /// assert_eq!(record.category, Category::Desktop);
    /// assert_eq!(record.status, TaskStatus::Pending);
    /// assert!(record.started_at.is_none());
    /// ```
    pub fn new(operation: &str) -> Self {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(TASK_ID_LEN);

        Self {
            id,
            operation: operation.to_string(),
            category: Category::for_operation(operation),
            status: TaskStatus::Pending,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
            result: None,
            error: None,
            cancel_requested: false,
        }
    }

    /// Seconds between `started_at` and `completed_at` (or now, while still
    /// running), rounded to two decimals. `None` until the task has started.
    pub fn duration_secs(&self) -> Option<f64> {
        let started = self.started_at?;
        let end = self.completed_at.unwrap_or_else(Utc::now);
        let secs = (end - started).num_milliseconds() as f64 / 1000.0;
        Some((secs * 100.0).round() / 100.0)
    }

    /// Requests cancellation.
    ///
    /// A `Pending` or `Running` record transitions to `Cancelled`
    /// immediately and the method returns `true`. This is eager and
    /// observational: the underlying handler, if already executing, keeps
    /// running; its eventual outcome is discarded because the record is now
    /// terminal. Returns `false` if the record was already terminal.
    pub fn cancel(&mut self) -> bool {
        match self.status {
            TaskStatus::Pending | TaskStatus::Running => {
                self.cancel_requested = true;
                self.status = TaskStatus::Cancelled;
                self.completed_at = Some(Utc::now());
                true
            }
            _ => false,
        }
    }

    /// Transitions `Pending -> Running` and stamps `started_at`.
    ///
    /// No-op for any other status (a cancelled-while-pending record stays
    /// cancelled).
    pub(crate) fn mark_running(&mut self) {
        if self.status == TaskStatus::Pending {
            self.status = TaskStatus::Running;
            self.started_at = Some(Utc::now());
        }
    }

    /// Transitions to `Completed` with the rendered result.
    ///
    /// No-op if the record is already terminal.
    pub(crate) fn complete(&mut self, result: String) {
        if self.status.is_terminal() {
            return;
        }
        self.status = TaskStatus::Completed;
        self.completed_at = Some(Utc::now());
        self.result = Some(result);
    }

    /// Transitions to `Failed` with the error message.
    ///
    /// No-op if the record is already terminal.
    pub(crate) fn fail(&mut self, error: String) {
        if self.status.is_terminal() {
            return;
        }
        self.status = TaskStatus::Failed;
        self.completed_at = Some(Utc::now());
        self.error = Some(error);
    }

    /// Produces the wire summary of this record.
    pub fn summary(&self) -> TaskSummary {
        TaskSummary {
            task_id: self.id.clone(),
            operation: self.operation.clone(),
            category: self.category,
            status: self.status,
            duration: self.duration_secs(),
            error: self.error.clone(),
        }
    }
}

/// Wire summary of a task record, as returned by status and list queries.
///
/// `duration` and `error` serialize as `null` until set, so callers can
/// distinguish "not started" from "instantaneous".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSummary {
    /// The task's ID.
    pub task_id: String,
    /// The invoked operation name.
    pub operation: String,
    /// The task's concurrency category.
    pub category: Category,
    /// Current lifecycle status.
    pub status: TaskStatus,
    /// Seconds spent executing, if started. Two-decimal rounding.
    pub duration: Option<f64>,
    /// Failure message, if the task failed.
    pub error: Option<String>,
}
