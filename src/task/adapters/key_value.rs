//! Task store that keeps the list as one JSON blob in a key-value store.

use async_trait::async_trait;
use std::sync::Arc;

use crate::storage::ports::KeyValueStore;
use crate::task::{
    domain::Task,
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Default storage key for the task list.
pub const TASKS_KEY: &str = "bitetask_tasks";

/// [`TaskStore`] backed by a JSON array under a single key.
#[derive(Debug, Clone)]
pub struct KeyValueTaskStore<K>
where
    K: KeyValueStore,
{
    store: Arc<K>,
    key: String,
}

impl<K> KeyValueTaskStore<K>
where
    K: KeyValueStore,
{
    /// Creates a task store using [`TASKS_KEY`].
    #[must_use]
    pub fn new(store: Arc<K>) -> Self {
        Self::with_key(store, TASKS_KEY)
    }

    /// Creates a task store using a custom key.
    #[must_use]
    pub fn with_key(store: Arc<K>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Returns the storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[async_trait]
impl<K> TaskStore for KeyValueTaskStore<K>
where
    K: KeyValueStore,
{
    async fn load(&self) -> TaskStoreResult<Vec<Task>> {
        let Some(blob) = self
            .store
            .get(&self.key)
            .await
            .map_err(TaskStoreError::persistence)?
        else {
            tracing::debug!(key = %self.key, "no stored task list");
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Task>>(&blob) {
            Ok(tasks) => {
                tracing::info!(key = %self.key, count = tasks.len(), "loaded task list");
                Ok(tasks)
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "stored task list is unreadable, starting empty");
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, tasks: &[Task]) -> TaskStoreResult<()> {
        let blob =
            serde_json::to_string(tasks).map_err(|err| TaskStoreError::Encoding(Arc::new(err)))?;
        self.store
            .set(&self.key, &blob)
            .await
            .map_err(TaskStoreError::persistence)?;
        tracing::debug!(key = %self.key, count = tasks.len(), "saved task list");
        Ok(())
    }
}
