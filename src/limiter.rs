//! Per-category concurrency limiter.
//!
//! One counting semaphore per [`Category`], sized to the category's cap.
//! Acquisition is bounded by a timeout; callers that exceed it are failed
//! fast rather than queued indefinitely. No FIFO fairness is guaranteed
//! among waiters. Permits release their slot on drop, which covers every
//! exit path through [`TaskManager::execute`](crate::TaskManager::execute),
//! handler failures included.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::timeout;

use crate::category::Category;
use crate::config::TaskConfig;
use crate::error::TaskError;

/// Counting semaphores enforcing each category's concurrency cap.
///
/// `Desktop`'s capacity of 1 is the mechanism serializing all screen/input
/// operations system-wide; the other categories permit bounded parallelism.
#[derive(Debug)]
pub(crate) struct CategoryLimiter {
    desktop: Arc<Semaphore>,
    file: Arc<Semaphore>,
    query: Arc<Semaphore>,
    shell: Arc<Semaphore>,
    network: Arc<Semaphore>,
}

impl CategoryLimiter {
    /// Builds the limiter from the effective per-category caps.
    pub(crate) fn new(config: &TaskConfig) -> Self {
        let semaphore = |category| Arc::new(Semaphore::new(config.limit_of(category)));
        Self {
            desktop: semaphore(Category::Desktop),
            file: semaphore(Category::File),
            query: semaphore(Category::Query),
            shell: semaphore(Category::Shell),
            network: semaphore(Category::Network),
        }
    }

    fn semaphore(&self, category: Category) -> &Arc<Semaphore> {
        match category {
            Category::Desktop => &self.desktop,
            Category::File => &self.file,
            Category::Query => &self.query,
            Category::Shell => &self.shell,
            Category::Network => &self.network,
        }
    }

    /// Waits up to `wait` for a slot in `category`.
    ///
    /// The returned permit holds the slot until dropped. Returns
    /// [`TaskError::SlotTimeout`] if the category stayed at capacity for
    /// the whole wait bound.
    pub(crate) async fn acquire(
        &self,
        category: Category,
        wait: Duration,
    ) -> Result<OwnedSemaphorePermit, TaskError> {
        let semaphore = Arc::clone(self.semaphore(category));
        match timeout(wait, semaphore.acquire_owned()).await {
            Ok(Ok(permit)) => Ok(permit),
            // The semaphores are never closed, so an acquire error can only
            // mean the slot is unobtainable; treat it like the timeout.
            Ok(Err(_)) | Err(_) => Err(TaskError::SlotTimeout { category }),
        }
    }

    /// Currently available slots for a category.
    #[cfg(test)]
    pub(crate) fn available(&self, category: Category) -> usize {
        self.semaphore(category).available_permits()
    }
}
