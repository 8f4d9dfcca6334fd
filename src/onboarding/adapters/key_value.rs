//! Onboarding store that keeps the record as a JSON blob.

use async_trait::async_trait;
use std::sync::Arc;

use crate::onboarding::{
    domain::OnboardingState,
    ports::{OnboardingStore, OnboardingStoreError, OnboardingStoreResult},
};
use crate::storage::ports::KeyValueStore;

/// Default storage key for the onboarding record.
pub const ONBOARDING_KEY: &str = "bitetask_onboarding";

/// [`OnboardingStore`] backed by a JSON object under a single key.
#[derive(Debug, Clone)]
pub struct KeyValueOnboardingStore<K>
where
    K: KeyValueStore,
{
    store: Arc<K>,
    key: String,
}

impl<K> KeyValueOnboardingStore<K>
where
    K: KeyValueStore,
{
    /// Creates an onboarding store using [`ONBOARDING_KEY`].
    #[must_use]
    pub fn new(store: Arc<K>) -> Self {
        Self::with_key(store, ONBOARDING_KEY)
    }

    /// Creates an onboarding store using a custom key.
    #[must_use]
    pub fn with_key(store: Arc<K>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

#[async_trait]
impl<K> OnboardingStore for KeyValueOnboardingStore<K>
where
    K: KeyValueStore,
{
    async fn load(&self) -> OnboardingStoreResult<OnboardingState> {
        let Some(blob) = self
            .store
            .get(&self.key)
            .await
            .map_err(OnboardingStoreError::persistence)?
        else {
            return Ok(OnboardingState::default());
        };
        Ok(serde_json::from_str(&blob).unwrap_or_else(|err| {
            tracing::warn!(key = %self.key, error = %err, "stored onboarding state is unreadable, using defaults");
            OnboardingState::default()
        }))
    }

    async fn save(&self, state: &OnboardingState) -> OnboardingStoreResult<()> {
        let blob = serde_json::to_string(state)
            .map_err(|err| OnboardingStoreError::Encoding(Arc::new(err)))?;
        self.store
            .set(&self.key, &blob)
            .await
            .map_err(OnboardingStoreError::persistence)
    }
}
