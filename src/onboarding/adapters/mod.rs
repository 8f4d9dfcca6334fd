//! Adapter implementations for the onboarding store.

pub mod key_value;
pub mod memory;

pub use key_value::{KeyValueOnboardingStore, ONBOARDING_KEY};
pub use memory::InMemoryOnboardingStore;
