//! Port contracts for onboarding persistence.

pub mod store;

pub use store::{OnboardingStore, OnboardingStoreError, OnboardingStoreResult};
