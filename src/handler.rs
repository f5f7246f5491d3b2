//! The collaborator contract: one named operation, one call.
//!
//! Everything the server exposes -- desktop input, file I/O, shell,
//! network diagnostics -- reaches the task core through [`ToolHandler`].
//! The manager treats a handler as a single opaque call: it awaits the
//! future to completion and observes cancellation only before and after.
//! Handlers that block (OS automation calls usually do) are expected to
//! wrap themselves, e.g. with `tokio::task::spawn_blocking`, behind this
//! trait.

use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;

use crate::output::ToolOutput;

/// A dispatchable operation.
///
/// `args` is the argument object of the inbound invocation. Failures are
/// ordinary `anyhow` errors; the manager absorbs them into `Failed` records
/// and tagged error strings, so a handler error can never crash the
/// dispatch surface.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Executes the operation with the given arguments.
    async fn handle(&self, args: Value) -> anyhow::Result<ToolOutput>;
}

/// Adapts a closure into a [`ToolHandler`].
///
/// # Examples
///
/// ```
/// use remotectl_tasks::{tool_fn, ToolOutput};
///
/// let handler = tool_fn(|args| async move {
///     let target = args["target"].as_str().unwrap_or("?").to_string();
///     Ok(ToolOutput::text(format!("pinged {target}")))
/// });
/// # let _ = handler;
/// ```
pub fn tool_fn<F, Fut>(f: F) -> FnTool<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<ToolOutput>> + Send,
{
    FnTool { f }
}

/// Closure-backed [`ToolHandler`], built with [`tool_fn`].
pub struct FnTool<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> ToolHandler for FnTool<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<ToolOutput>> + Send,
{
    async fn handle(&self, args: Value) -> anyhow::Result<ToolOutput> {
        (self.f)(args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn closure_handler_runs() {
        let handler = tool_fn(|args| async move {
            Ok(ToolOutput::text(format!("got {}", args["x"])))
        });
        let output = handler.handle(json!({ "x": 7 })).await.unwrap();
        assert_eq!(output, ToolOutput::text("got 7"));
    }

    #[tokio::test]
    async fn closure_handler_propagates_errors() {
        let handler = tool_fn(|_args| async move {
            Err(anyhow::anyhow!("boom"))
        });
        let err = handler.handle(json!({})).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
