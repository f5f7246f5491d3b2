//! Defaults and well-known operation names.

/// Maximum number of terminal task records retained in history.
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Maximum number of summaries returned by a single list query.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Seconds to wait for a category concurrency slot before failing the task.
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Length of a task ID: the first 12 hex chars of a UUIDv4.
pub const TASK_ID_LEN: usize = 12;

/// Administrative operation: cancel a task by ID.
pub const TOOL_CANCEL_TASK: &str = "CancelTask";

/// Administrative operation: status of one task, or the recent-task listing.
pub const TOOL_GET_TASK_STATUS: &str = "GetTaskStatus";

/// Administrative operation: list running and pending tasks.
pub const TOOL_GET_RUNNING_TASKS: &str = "GetRunningTasks";
