//! Persistence port for the onboarding record.

use crate::onboarding::domain::OnboardingState;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for onboarding store operations.
pub type OnboardingStoreResult<T> = Result<T, OnboardingStoreError>;

/// Onboarding record persistence contract.
#[async_trait]
pub trait OnboardingStore: Send + Sync {
    /// Loads the onboarding record; absent or unreadable data loads as the
    /// default record.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingStoreError::Persistence`] when the backend fails.
    async fn load(&self) -> OnboardingStoreResult<OnboardingState>;

    /// Replaces the onboarding record.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingStoreError`] when the record cannot be encoded or
    /// written.
    async fn save(&self, state: &OnboardingState) -> OnboardingStoreResult<()>;
}

/// Errors returned by onboarding store implementations.
#[derive(Debug, Clone, Error)]
pub enum OnboardingStoreError {
    /// The record could not be encoded.
    #[error("failed to encode onboarding state: {0}")]
    Encoding(Arc<serde_json::Error>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl OnboardingStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
