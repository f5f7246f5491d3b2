//! Error types for task operations.
//!
//! [`TaskError`] covers the failures the task manager itself can produce.
//! Handler failures are a separate concern: they arrive as `anyhow::Error`
//! at the [`ToolHandler`](crate::ToolHandler) boundary and are absorbed into
//! `Failed` records by the manager, never surfaced as errors.

use thiserror::Error;

use crate::category::Category;
use crate::record::TaskStatus;

/// Errors produced by task manager and store operations.
///
/// Each variant carries the context needed to render a caller-facing
/// message. Use [`error_code`](TaskError::error_code) to map to a JSON-RPC
/// error code at the transport boundary.
///
/// # Examples
///
/// ```
/// use remotectl_tasks::{Category, TaskError};
///
/// let err = TaskError::SlotTimeout { category: Category::Shell };
/// assert!(err.to_string().contains("shell"));
/// assert_eq!(err.error_code(), -32603);
/// ```
#[derive(Debug, Error)]
pub enum TaskError {
    /// No task with the given ID exists.
    #[error("Task {task_id} not found")]
    NotFound {
        /// The task ID that was not found.
        task_id: String,
    },

    /// The task is already in a terminal state and cannot change.
    #[error("Task {task_id} is already {status}")]
    AlreadyTerminal {
        /// The task ID.
        task_id: String,
        /// The terminal status the task is in.
        status: TaskStatus,
    },

    /// The category was at capacity for the whole wait bound.
    #[error("timeout waiting for {category} lock (another {category} task is running)")]
    SlotTimeout {
        /// The category whose slots were exhausted.
        category: Category,
    },
}

impl TaskError {
    /// Maps this error to a JSON-RPC error code.
    ///
    /// Caller-addressable errors (unknown or already-terminal task IDs) map
    /// to `-32602` (invalid params); capacity exhaustion maps to `-32603`
    /// (internal error).
    pub fn error_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } | Self::AlreadyTerminal { .. } => -32602,
            Self::SlotTimeout { .. } => -32603,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = TaskError::NotFound {
            task_id: "abc123".to_string(),
        };
        assert_eq!(err.to_string(), "Task abc123 not found");

        let err = TaskError::AlreadyTerminal {
            task_id: "abc123".to_string(),
            status: TaskStatus::Completed,
        };
        assert_eq!(err.to_string(), "Task abc123 is already completed");
    }

    #[test]
    fn slot_timeout_names_the_category() {
        let err = TaskError::SlotTimeout {
            category: Category::Desktop,
        };
        assert_eq!(
            err.to_string(),
            "timeout waiting for desktop lock (another desktop task is running)"
        );
    }

    #[test]
    fn error_codes() {
        assert_eq!(
            TaskError::NotFound {
                task_id: "t".to_string()
            }
            .error_code(),
            -32602
        );
        assert_eq!(
            TaskError::AlreadyTerminal {
                task_id: "t".to_string(),
                status: TaskStatus::Failed,
            }
            .error_code(),
            -32602
        );
        assert_eq!(
            TaskError::SlotTimeout {
                category: Category::Query
            }
            .error_code(),
            -32603
        );
    }
}
