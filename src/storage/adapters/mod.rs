//! Key-value store adapters.

pub mod directory;
pub mod memory;

pub use directory::DirectoryKeyValueStore;
pub use memory::InMemoryKeyValueStore;
