//! Process-wide configuration for the task core.

use std::collections::HashMap;
use std::time::Duration;

use crate::category::Category;
use crate::constants::{DEFAULT_ACQUIRE_TIMEOUT_SECS, DEFAULT_LIST_LIMIT, DEFAULT_MAX_HISTORY};

/// Tunables for the task manager, set once at startup.
///
/// # Defaults
///
/// | Setting           | Default | Description                              |
/// |-------------------|---------|------------------------------------------|
/// | `acquire_timeout` | 30s     | Wait bound for a category slot           |
/// | `max_history`     | 100     | Terminal records retained                |
/// | `list_limit`      | 50      | Summaries returned per list query        |
/// | category limits   | per [`Category::limit`] | Overridable per category |
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use remotectl_tasks::{Category, TaskConfig};
///
/// let config = TaskConfig::default()
///     .with_acquire_timeout(Duration::from_secs(5))
///     .with_max_history(20)
///     .with_limit(Category::Shell, 1);
/// assert_eq!(config.limit_of(Category::Shell), 1);
/// assert_eq!(config.limit_of(Category::Network), 5);
/// ```
#[derive(Debug, Clone)]
pub struct TaskConfig {
    /// How long a task waits for its category's concurrency slot before
    /// failing with a timeout.
    pub acquire_timeout: Duration,
    /// Maximum number of terminal records retained in history.
    pub max_history: usize,
    /// Maximum number of summaries returned by one list query.
    pub list_limit: usize,
    limit_overrides: HashMap<Category, usize>,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
            max_history: DEFAULT_MAX_HISTORY,
            list_limit: DEFAULT_LIST_LIMIT,
            limit_overrides: HashMap::new(),
        }
    }
}

impl TaskConfig {
    /// Sets the slot acquisition wait bound.
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Sets the terminal-history cap.
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    /// Sets the list query cap.
    pub fn with_list_limit(mut self, list_limit: usize) -> Self {
        self.list_limit = list_limit;
        self
    }

    /// Overrides the concurrency cap for one category.
    ///
    /// A `limit` of 0 is ignored; every category admits at least one task.
    pub fn with_limit(mut self, category: Category, limit: usize) -> Self {
        if limit > 0 {
            self.limit_overrides.insert(category, limit);
        }
        self
    }

    /// Effective concurrency cap for a category. Always > 0.
    pub fn limit_of(&self, category: Category) -> usize {
        self.limit_overrides
            .get(&category)
            .copied()
            .unwrap_or_else(|| category.limit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TaskConfig::default();
        assert_eq!(config.acquire_timeout, Duration::from_secs(30));
        assert_eq!(config.max_history, 100);
        assert_eq!(config.list_limit, 50);
        for category in Category::ALL {
            assert_eq!(config.limit_of(category), category.limit());
        }
    }

    #[test]
    fn builder_overrides() {
        let config = TaskConfig::default()
            .with_acquire_timeout(Duration::from_millis(100))
            .with_max_history(7)
            .with_list_limit(3)
            .with_limit(Category::Desktop, 2);
        assert_eq!(config.acquire_timeout, Duration::from_millis(100));
        assert_eq!(config.max_history, 7);
        assert_eq!(config.list_limit, 3);
        assert_eq!(config.limit_of(Category::Desktop), 2);
    }

    #[test]
    fn zero_limit_is_ignored() {
        let config = TaskConfig::default().with_limit(Category::Shell, 0);
        assert_eq!(config.limit_of(Category::Shell), Category::Shell.limit());
    }
}
