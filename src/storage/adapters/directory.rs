//! Directory-backed key-value store, one file per key.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;
use std::sync::Arc;

use crate::storage::ports::{KeyValueStore, StorageError, StorageResult};

const EXTENSION: &str = "json";

/// Key-value store that keeps each blob in `<key>.json` under one directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never sees a half-written blob.
#[derive(Debug, Clone)]
pub struct DirectoryKeyValueStore {
    dir: Arc<Dir>,
}

impl DirectoryKeyValueStore {
    /// Opens the directory at `path`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] when the directory cannot be created
    /// or opened.
    pub fn open(path: &Utf8Path) -> StorageResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(StorageError::backend)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(StorageError::backend)?;
        Ok(Self { dir: Arc::new(dir) })
    }

    async fn run_blocking<T, F>(&self, op: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Dir) -> io::Result<T> + Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || op(&dir))
            .await
            .map_err(StorageError::backend)?
            .map_err(StorageError::backend)
    }
}

/// Accepts keys made of ASCII letters, digits, `-`, and `_`.
fn file_name(key: &str) -> StorageResult<String> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if !valid {
        return Err(StorageError::InvalidKey(key.to_owned()));
    }
    Ok(format!("{key}.{EXTENSION}"))
}

#[async_trait]
impl KeyValueStore for DirectoryKeyValueStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let name = file_name(key)?;
        self.run_blocking(move |dir| match dir.read_to_string(&name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let name = file_name(key)?;
        let staging = format!(".{name}.tmp");
        let contents = value.to_owned();
        self.run_blocking(move |dir| {
            dir.write(&staging, contents.as_bytes())?;
            dir.rename(&staging, dir, &name)
        })
        .await
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let name = file_name(key)?;
        self.run_blocking(move |dir| match dir.remove_file(&name) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        })
        .await
    }
}
