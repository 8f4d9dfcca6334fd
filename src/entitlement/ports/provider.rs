//! Port for the subscription provider.

use crate::entitlement::domain::PurchaseOutcome;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for entitlement operations.
pub type EntitlementResult<T> = Result<T, EntitlementError>;

/// Subscription provider contract.
#[async_trait]
pub trait EntitlementProvider: Send + Sync {
    /// Returns whether the user currently holds the entitlement.
    fn is_entitled(&self) -> bool;

    /// Attempts to buy `product_id`.
    async fn purchase(&self, product_id: &str) -> PurchaseOutcome;

    /// Restores earlier purchases and returns whether the entitlement is now
    /// active.
    ///
    /// # Errors
    ///
    /// Returns [`EntitlementError`] when the provider cannot be reached.
    async fn restore(&self) -> EntitlementResult<bool>;
}

/// Errors returned by entitlement providers.
#[derive(Debug, Clone, Error)]
pub enum EntitlementError {
    /// Provider failure.
    #[error("entitlement provider error: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl EntitlementError {
    /// Wraps a provider error.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }
}
