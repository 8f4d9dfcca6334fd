//! In-memory entitlement provider.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::entitlement::{
    domain::PurchaseOutcome,
    ports::{EntitlementError, EntitlementProvider, EntitlementResult},
};

/// Entitlement provider kept in memory.
///
/// Purchases of a known product succeed unless the next purchase has been
/// set to cancel. Restore succeeds when the account owns a purchase.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEntitlementProvider {
    state: Arc<ProviderState>,
}

#[derive(Debug, Default)]
struct ProviderState {
    products: HashSet<String>,
    entitled: AtomicBool,
    owned_on_account: AtomicBool,
    cancel_next: AtomicBool,
    offline: AtomicBool,
}

impl InMemoryEntitlementProvider {
    /// Creates a provider selling `products`.
    #[must_use]
    pub fn new<I, S>(products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            state: Arc::new(ProviderState {
                products: products.into_iter().map(Into::into).collect(),
                ..ProviderState::default()
            }),
        }
    }

    /// Grants or revokes the entitlement directly.
    pub fn set_entitled(&self, entitled: bool) {
        self.state.entitled.store(entitled, Ordering::SeqCst);
    }

    /// Marks the account as owning a purchase that restore can recover.
    pub fn set_owned_on_account(&self, owned: bool) {
        self.state.owned_on_account.store(owned, Ordering::SeqCst);
    }

    /// Makes the next purchase end as cancelled.
    pub fn cancel_next_purchase(&self) {
        self.state.cancel_next.store(true, Ordering::SeqCst);
    }

    /// Makes restore fail as if the provider were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.state.offline.store(offline, Ordering::SeqCst);
    }
}

#[async_trait]
impl EntitlementProvider for InMemoryEntitlementProvider {
    fn is_entitled(&self) -> bool {
        self.state.entitled.load(Ordering::SeqCst)
    }

    async fn purchase(&self, product_id: &str) -> PurchaseOutcome {
        if self.state.cancel_next.swap(false, Ordering::SeqCst) {
            return PurchaseOutcome::Cancelled;
        }
        if !self.state.products.contains(product_id) {
            return PurchaseOutcome::Failed(format!("unknown product: {product_id}"));
        }
        self.state.owned_on_account.store(true, Ordering::SeqCst);
        self.state.entitled.store(true, Ordering::SeqCst);
        PurchaseOutcome::Purchased
    }

    async fn restore(&self) -> EntitlementResult<bool> {
        if self.state.offline.load(Ordering::SeqCst) {
            return Err(EntitlementError::provider(std::io::Error::other(
                "provider unreachable",
            )));
        }
        let owned = self.state.owned_on_account.load(Ordering::SeqCst);
        if owned {
            self.state.entitled.store(true, Ordering::SeqCst);
        }
        Ok(owned)
    }
}
