//! Tool result variants and task-ID annotation.
//!
//! Handlers return either plain text or a sequence of content parts
//! (text and images, matching MCP content items on the wire). Every result
//! leaving [`TaskManager::execute`](crate::TaskManager::execute) carries
//! the task's ID so callers can correlate it with later status or cancel
//! calls; [`ToolOutput::tagged`] implements the injection explicitly per
//! variant.

use serde::{Deserialize, Serialize};

/// One content item of a multi-part result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Part {
    /// Text content.
    #[serde(rename_all = "camelCase")]
    Text {
        /// The text content.
        text: String,
    },
    /// Image content.
    #[serde(rename_all = "camelCase")]
    Image {
        /// Base64-encoded image data.
        data: String,
        /// MIME type (e.g., "image/jpeg").
        mime_type: String,
    },
}

/// Result of one tool invocation.
///
/// # Examples
///
/// ```
/// use remotectl_tasks::{Part, ToolOutput};
///
/// let tagged = ToolOutput::text("done").tagged("abc123def456");
/// assert_eq!(tagged, ToolOutput::Text("[task:abc123def456] done".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutput {
    /// A single text result.
    Text(String),
    /// A multi-part result (e.g., a screenshot plus a text summary).
    Parts(Vec<Part>),
}

impl ToolOutput {
    /// Convenience constructor for a text result.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Annotates this output with a task ID.
    ///
    /// Text results are prefixed with `[task:<id>] `. Multi-part results
    /// have the ID prefixed into the first text-bearing part; if no part
    /// carries text, a new leading text part is inserted so the ID is never
    /// lost.
    pub fn tagged(self, task_id: &str) -> Self {
        match self {
            Self::Text(text) => Self::Text(format!("[task:{task_id}] {text}")),
            Self::Parts(mut parts) => {
                let first_text = parts
                    .iter_mut()
                    .find_map(|part| match part {
                        Part::Text { text } => Some(text),
                        Part::Image { .. } => None,
                    });
                match first_text {
                    Some(text) => *text = format!("[task:{task_id}] {text}"),
                    None => parts.insert(
                        0,
                        Part::Text {
                            text: format!("[task:{task_id}]"),
                        },
                    ),
                }
                Self::Parts(parts)
            }
        }
    }

    /// Text rendering stored as the record's result payload.
    ///
    /// Multi-part results render as their first text part, or a part count
    /// when no part carries text.
    pub(crate) fn summary_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Parts(parts) => parts
                .iter()
                .find_map(|part| match part {
                    Part::Text { text } => Some(text.clone()),
                    Part::Image { .. } => None,
                })
                .unwrap_or_else(|| format!("{} content parts", parts.len())),
        }
    }
}
