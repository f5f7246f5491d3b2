//! Concurrency categories and the operation-name registry.
//!
//! Every dispatchable operation belongs to exactly one [`Category`], which
//! determines how many invocations of that resource class may run at once.
//! The mapping is static, total, and deterministic: names the registry does
//! not know resolve to [`Category::Query`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Resource-contention class of an operation.
///
/// Categories partition operations by the shared resource they contend on.
/// `Desktop` is exclusive: there is one physical display and input device,
/// so at most one desktop-class operation runs at a time system-wide. The
/// remaining categories permit bounded parallelism.
///
/// # Examples
///
/// ```
/// use remotectl_tasks::Category;
///
/// assert_eq!(Category::for_operation("Click"), Category::Desktop);
/// assert_eq!(Category::for_operation("NoSuchTool"), Category::Query);
/// assert_eq!(Category::Desktop.limit(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Mouse/keyboard/screen/window interaction. Exclusive.
    Desktop,
    /// File system operations.
    File,
    /// Read-mostly system queries.
    Query,
    /// External process spawns.
    Shell,
    /// Network diagnostics.
    Network,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Desktop => write!(f, "desktop"),
            Self::File => write!(f, "file"),
            Self::Query => write!(f, "query"),
            Self::Shell => write!(f, "shell"),
            Self::Network => write!(f, "network"),
        }
    }
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Desktop,
        Self::File,
        Self::Query,
        Self::Shell,
        Self::Network,
    ];

    /// Resolves an operation name to its category.
    ///
    /// Total over all strings: names the registry does not know default to
    /// `Query`, so dispatch never fails on an unmapped operation.
    pub fn for_operation(name: &str) -> Self {
        match name {
            // Desktop -- one shared display/input surface.
            "Snapshot" | "AnnotatedSnapshot" | "Click" | "Type" | "Scroll" | "Move"
            | "Shortcut" | "FocusWindow" | "MinimizeAll" | "App" | "OCR" | "ScreenRecord"
            | "LockScreen" | "Wait" => Self::Desktop,

            "FileRead" | "FileWrite" | "FileList" | "FileSearch" | "FileDownload"
            | "FileUpload" => Self::File,

            "GetSystemInfo" | "GetClipboard" | "SetClipboard" | "ListProcesses"
            | "KillProcess" | "Notification" | "RegRead" | "RegWrite" | "ServiceList"
            | "ServiceStart" | "ServiceStop" | "TaskList" | "TaskCreate" | "TaskDelete"
            | "EventLog" => Self::Query,

            "Shell" | "Scrape" => Self::Shell,

            "Ping" | "PortCheck" | "NetConnections" => Self::Network,

            _ => Self::Query,
        }
    }

    /// Default concurrency cap for this category. Always > 0.
    pub fn limit(&self) -> usize {
        match self {
            Self::Desktop => 1,
            Self::File => 5,
            Self::Query => 10,
            Self::Shell => 3,
            Self::Network => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_operations_resolve() {
        assert_eq!(Category::for_operation("Click"), Category::Desktop);
        assert_eq!(Category::for_operation("Snapshot"), Category::Desktop);
        assert_eq!(Category::for_operation("FileRead"), Category::File);
        assert_eq!(Category::for_operation("RegRead"), Category::Query);
        assert_eq!(Category::for_operation("Shell"), Category::Shell);
        assert_eq!(Category::for_operation("Ping"), Category::Network);
    }

    #[test]
    fn unknown_operations_default_to_query() {
        assert_eq!(Category::for_operation(""), Category::Query);
        assert_eq!(Category::for_operation("NoSuchTool"), Category::Query);
        assert_eq!(Category::for_operation("click"), Category::Query); // case-sensitive
    }

    #[test]
    fn lookup_is_deterministic() {
        for name in ["Click", "Shell", "Ping", "whatever"] {
            assert_eq!(Category::for_operation(name), Category::for_operation(name));
        }
    }

    #[test]
    fn desktop_is_exclusive() {
        assert_eq!(Category::Desktop.limit(), 1);
    }

    #[test]
    fn all_limits_are_positive() {
        for category in Category::ALL {
            assert!(category.limit() > 0, "{category} must allow at least one task");
        }
    }

    #[test]
    fn display_matches_serde() {
        for category in Category::ALL {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, category.to_string());
        }
    }

    #[test]
    fn serde_round_trip() {
        for category in Category::ALL {
            let json = serde_json::to_value(category).unwrap();
            let back: Category = serde_json::from_value(json).unwrap();
            assert_eq!(category, back);
        }
    }
}
