//! Paywall gate bound to an entitlement provider.

use std::sync::{Arc, Mutex, PoisonError};

use crate::entitlement::{
    domain::{PaywallGate, PaywallSignal, PurchaseOutcome},
    ports::{EntitlementProvider, EntitlementResult},
};

/// Combines the provider with the paywall gate.
pub struct EntitlementService<P>
where
    P: EntitlementProvider,
{
    provider: Arc<P>,
    gate: Mutex<PaywallGate>,
}

impl<P> EntitlementService<P>
where
    P: EntitlementProvider,
{
    /// Creates a service whose paywall fires at `threshold` completed tasks.
    #[must_use]
    pub fn new(provider: Arc<P>, threshold: usize) -> Self {
        Self {
            provider,
            gate: Mutex::new(PaywallGate::new(threshold)),
        }
    }

    /// Returns whether the user holds the entitlement.
    #[must_use]
    pub fn is_entitled(&self) -> bool {
        self.provider.is_entitled()
    }

    /// Returns whether the paywall currently blocks the board.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.gate().is_shown() && !self.provider.is_entitled()
    }

    /// Feeds the current completed count to the gate.
    pub fn observe(&self, completed_count: usize) -> PaywallSignal {
        let entitled = self.provider.is_entitled();
        let signal = self.gate().observe(completed_count, entitled);
        if signal == PaywallSignal::Show {
            tracing::info!(completed = completed_count, "paywall triggered");
        }
        signal
    }

    /// Buys `product_id`; a successful purchase hides the paywall.
    pub async fn purchase(&self, product_id: &str) -> PurchaseOutcome {
        tracing::info!(product = product_id, "attempting purchase");
        let outcome = self.provider.purchase(product_id).await;
        match &outcome {
            PurchaseOutcome::Purchased => {
                self.gate().hide();
                tracing::info!(product = product_id, "purchase succeeded");
            }
            PurchaseOutcome::Cancelled => {
                tracing::info!(product = product_id, "purchase cancelled");
            }
            PurchaseOutcome::Failed(reason) => {
                tracing::warn!(product = product_id, reason = %reason, "purchase failed");
            }
        }
        outcome
    }

    /// Restores earlier purchases; hides the paywall when the entitlement
    /// comes back. Returns whether it did.
    ///
    /// # Errors
    ///
    /// Returns the provider's error when restore cannot complete.
    pub async fn restore(&self) -> EntitlementResult<bool> {
        let granted = self.provider.restore().await.inspect_err(|err| {
            tracing::warn!(error = %err, "restore failed");
        })?;
        if granted {
            self.gate().hide();
        }
        tracing::info!(granted, "restore finished");
        Ok(granted)
    }

    fn gate(&self) -> std::sync::MutexGuard<'_, PaywallGate> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
