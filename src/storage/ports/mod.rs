//! Port contracts for blob storage.

pub mod key_value;

pub use key_value::{KeyValueStore, StorageError, StorageResult};
