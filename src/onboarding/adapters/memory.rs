//! In-memory onboarding store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::onboarding::{
    domain::OnboardingState,
    ports::{OnboardingStore, OnboardingStoreError, OnboardingStoreResult},
};

/// Thread-safe in-memory onboarding store. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOnboardingStore {
    state: Arc<RwLock<OnboardingState>>,
}

impl InMemoryOnboardingStore {
    /// Creates a store holding the default record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `state`.
    #[must_use]
    pub fn with_state(state: OnboardingState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }
}

fn poisoned(err: impl std::fmt::Display) -> OnboardingStoreError {
    OnboardingStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl OnboardingStore for InMemoryOnboardingStore {
    async fn load(&self) -> OnboardingStoreResult<OnboardingState> {
        Ok(self.state.read().map_err(poisoned)?.clone())
    }

    async fn save(&self, state: &OnboardingState) -> OnboardingStoreResult<()> {
        *self.state.write().map_err(poisoned)? = state.clone();
        Ok(())
    }
}
