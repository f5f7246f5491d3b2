//! Tool dispatch surface.
//!
//! [`ToolRouter`] maps operation names to handlers and routes every
//! inbound invocation through the [`TaskManager`]. The three
//! administrative operations (`CancelTask`, `GetTaskStatus`,
//! `GetRunningTasks`) are answered directly from the manager's query
//! surface -- they are excluded from wrapping here, by the router, not by
//! the manager.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::constants::{TOOL_CANCEL_TASK, TOOL_GET_RUNNING_TASKS, TOOL_GET_TASK_STATUS};
use crate::handler::ToolHandler;
use crate::manager::TaskManager;
use crate::output::ToolOutput;
use crate::record::TaskSummary;

/// Routes named operations through the task manager.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use remotectl_tasks::{tool_fn, TaskManager, ToolOutput, ToolRouter};
///
/// let router = ToolRouter::new(Arc::new(TaskManager::new()))
///     .tool("Ping", tool_fn(|_args| async { Ok(ToolOutput::text("pong")) }));
/// assert!(router.is_registered("Ping"));
/// ```
pub struct ToolRouter {
    manager: Arc<TaskManager>,
    tools: HashMap<String, Arc<dyn ToolHandler>>,
}

impl ToolRouter {
    /// Creates an empty router over the given manager.
    pub fn new(manager: Arc<TaskManager>) -> Self {
        Self {
            manager,
            tools: HashMap::new(),
        }
    }

    /// Registers a handler under an operation name. Replaces any previous
    /// registration of the same name.
    pub fn tool(mut self, name: impl Into<String>, handler: impl ToolHandler + 'static) -> Self {
        self.tools.insert(name.into(), Arc::new(handler));
        self
    }

    /// Whether an operation name has a registered handler.
    pub fn is_registered(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// The manager this router dispatches through.
    pub fn manager(&self) -> &Arc<TaskManager> {
        &self.manager
    }

    /// Dispatches one inbound invocation.
    ///
    /// Administrative operations are answered directly; every other
    /// registered name goes through [`TaskManager::execute`]. Unknown
    /// names produce a text result, not an error.
    pub async fn dispatch(&self, name: &str, args: Value) -> ToolOutput {
        match name {
            TOOL_CANCEL_TASK => self.cancel_task(&args),
            TOOL_GET_TASK_STATUS => self.task_status(&args),
            TOOL_GET_RUNNING_TASKS => self.running_tasks(),
            _ => match self.tools.get(name) {
                Some(handler) => self.manager.execute(name, handler.as_ref(), args).await,
                None => ToolOutput::text(format!("Unknown tool: {name}")),
            },
        }
    }

    fn cancel_task(&self, args: &Value) -> ToolOutput {
        let Some(task_id) = args.get("task_id").and_then(Value::as_str) else {
            return ToolOutput::text("CancelTask requires a task_id");
        };
        match self.manager.cancel(task_id) {
            Ok(record) => {
                ToolOutput::text(format!("Cancelled task {task_id} ({})", record.operation))
            }
            Err(err) => ToolOutput::text(format!("Cancel failed: {err}")),
        }
    }

    fn task_status(&self, args: &Value) -> ToolOutput {
        let task_id = args.get("task_id").and_then(Value::as_str).unwrap_or("");
        if !task_id.is_empty() {
            return match self.manager.task_status(task_id) {
                Some(summary) => ToolOutput::text(
                    serde_json::to_string_pretty(&summary)
                        .unwrap_or_else(|_| format!("{summary:?}")),
                ),
                None => ToolOutput::text(format!("Task {task_id} not found")),
            };
        }

        let tasks = self.manager.recent_tasks(None);
        if tasks.is_empty() {
            return ToolOutput::text("No tasks in history.");
        }
        let mut lines = vec!["Recent tasks:".to_string()];
        for task in tasks.iter().take(20) {
            lines.push(format!(
                "  [{}] {} → {}{}{}",
                task.task_id,
                task.operation,
                task.status,
                duration_suffix(task),
                match &task.error {
                    Some(error) => format!(" — {error}"),
                    None => String::new(),
                },
            ));
        }
        ToolOutput::Text(lines.join("\n"))
    }

    fn running_tasks(&self) -> ToolOutput {
        let active = self.manager.active_tasks();
        if active.is_empty() {
            return ToolOutput::text("No active tasks.");
        }
        let mut lines = vec![format!("Active tasks ({}):", active.len())];
        for task in &active {
            lines.push(format!(
                "  [{}] {} [{}] {}{}",
                task.task_id,
                task.operation,
                task.category,
                task.status,
                duration_suffix(task),
            ));
        }
        ToolOutput::Text(lines.join("\n"))
    }
}

fn duration_suffix(task: &TaskSummary) -> String {
    match task.duration {
        Some(duration) => format!(" ({duration}s)"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::tool_fn;
    use serde_json::json;

    fn router() -> ToolRouter {
        ToolRouter::new(Arc::new(TaskManager::new()))
            .tool("Ping", tool_fn(|_args| async { Ok(ToolOutput::text("pong")) }))
    }

    #[tokio::test]
    async fn registered_tool_is_wrapped() {
        let router = router();
        let output = router.dispatch("Ping", json!({})).await;
        let ToolOutput::Text(text) = output else {
            panic!("text result expected");
        };
        assert!(text.starts_with("[task:"), "got {text}");
        assert!(text.ends_with("] pong"), "got {text}");
    }

    #[tokio::test]
    async fn unknown_tool_is_a_text_result() {
        let router = router();
        let output = router.dispatch("Teleport", json!({})).await;
        assert_eq!(output, ToolOutput::text("Unknown tool: Teleport"));
        // No record is created for unknown names.
        assert!(router.manager().recent_tasks(None).is_empty());
    }

    #[tokio::test]
    async fn cancel_task_requires_an_id() {
        let router = router();
        let output = router.dispatch("CancelTask", json!({})).await;
        assert_eq!(output, ToolOutput::text("CancelTask requires a task_id"));
    }

    #[tokio::test]
    async fn cancel_task_not_found() {
        let router = router();
        let output = router
            .dispatch("CancelTask", json!({ "task_id": "feedfacecafe" }))
            .await;
        assert_eq!(
            output,
            ToolOutput::text("Cancel failed: Task feedfacecafe not found")
        );
    }

    #[tokio::test]
    async fn get_task_status_empty_history() {
        let router = router();
        let output = router.dispatch("GetTaskStatus", json!({})).await;
        assert_eq!(output, ToolOutput::text("No tasks in history."));
    }

    #[tokio::test]
    async fn get_running_tasks_empty() {
        let router = router();
        let output = router.dispatch("GetRunningTasks", json!({})).await;
        assert_eq!(output, ToolOutput::text("No active tasks."));
    }

    #[tokio::test]
    async fn admin_operations_are_not_wrapped() {
        let router = router();
        router.dispatch("GetRunningTasks", json!({})).await;
        router.dispatch("GetTaskStatus", json!({})).await;
        // Neither admin call created a task record.
        assert!(router.manager().recent_tasks(None).is_empty());
    }
}
