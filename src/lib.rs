//! Task execution and concurrency control for the remotectl automation
//! server.
//!
//! Every operation the server exposes -- desktop input, file I/O, shell,
//! network diagnostics -- is dispatched through this crate's
//! [`TaskManager`], which wraps the call with:
//!
//! - **bounded concurrency** per resource category (one shared display
//!   means at most one desktop operation at a time; file, query, shell and
//!   network operations get bounded pools);
//! - **fault isolation**: handler failures become `failed` task records and
//!   tagged error strings, never errors crossing the dispatch surface;
//! - **cooperative cancellation**: a cancel request flips the task to
//!   `cancelled` immediately, while the handler (which cannot be safely
//!   interrupted mid-OS-call) runs to completion and has its late outcome
//!   discarded;
//! - **lifecycle tracking** with bounded history retention, queryable
//!   through the `GetTaskStatus` / `GetRunningTasks` / `CancelTask`
//!   administrative operations.
//!
//! Every result is tagged `[task:<id>]` so a caller can correlate any
//! response with later status or cancel calls.
//!
//! # Module Organization
//!
//! - [`category`] - Concurrency categories and the operation registry
//! - [`record`] - Task records, status state machine, wire summaries
//! - [`store`] - Thread-safe store with bounded-history eviction
//! - [`manager`] - The `execute` wrapper and query/cancel surface
//! - [`router`] - Dispatch surface routing named operations
//! - [`handler`] / [`output`] - The collaborator contract and result types
//! - [`config`] / [`constants`] / [`error`] - Tunables and error taxonomy

pub mod category;
pub mod config;
pub mod constants;
pub mod error;
pub mod handler;
mod limiter;
pub mod manager;
pub mod output;
pub mod record;
pub mod router;
pub mod store;

pub use category::Category;
pub use config::TaskConfig;
pub use error::TaskError;
pub use handler::{tool_fn, FnTool, ToolHandler};
pub use manager::TaskManager;
pub use output::{Part, ToolOutput};
pub use record::{TaskRecord, TaskStatus, TaskSummary};
pub use router::ToolRouter;
pub use store::TaskStore;
