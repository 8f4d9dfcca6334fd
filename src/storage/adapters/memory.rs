//! In-memory key-value store for tests and ephemeral sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::storage::ports::{KeyValueStore, StorageError, StorageResult};

/// Thread-safe in-memory key-value store.
///
/// Clones share the same underlying map, so a test can keep a handle and
/// inspect what a service wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    state: Arc<InMemoryState>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    values: RwLock<HashMap<String, String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.state.values.write() {
            values.insert(key.into(), value.into());
        }
        store
    }

    /// Makes subsequent writes fail with a backend error.
    pub fn fail_writes(&self, fail: bool) {
        self.state.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Returns how many writes have succeeded.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.state.writes.load(Ordering::SeqCst)
    }

    /// Returns the stored value without going through the async port.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.state
            .values
            .read()
            .ok()
            .and_then(|values| values.get(key).cloned())
    }

    fn check_writable(&self) -> StorageResult<()> {
        if self.state.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::backend(std::io::Error::other(
                "writes disabled",
            )));
        }
        Ok(())
    }
}

fn poisoned(err: impl std::fmt::Display) -> StorageError {
    StorageError::backend(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let values = self.state.values.read().map_err(poisoned)?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_writable()?;
        let mut values = self.state.values.write().map_err(poisoned)?;
        values.insert(key.to_owned(), value.to_owned());
        self.state.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.check_writable()?;
        let mut values = self.state.values.write().map_err(poisoned)?;
        values.remove(key);
        Ok(())
    }
}
