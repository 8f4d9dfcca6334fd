//! Persistence port for the task list.

use crate::task::domain::Task;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Whole-list task persistence contract.
///
/// The list is read once at startup and rewritten in full after every
/// change.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Loads the persisted task list.
    ///
    /// Absent or unreadable data loads as an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the backend itself fails.
    async fn load(&self) -> TaskStoreResult<Vec<Task>>;

    /// Replaces the persisted task list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the list cannot be encoded or written.
    async fn save(&self, tasks: &[Task]) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task list could not be encoded.
    #[error("failed to encode task list: {0}")]
    Encoding(Arc<serde_json::Error>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
