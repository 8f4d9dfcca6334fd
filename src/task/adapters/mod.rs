//! Adapter implementations for task ports.

pub mod key_value;
pub mod memory;

pub use key_value::{KeyValueTaskStore, TASKS_KEY};
