//! Purchase results.

/// Result of a purchase attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// The purchase went through and the entitlement is active.
    Purchased,
    /// The user backed out.
    Cancelled,
    /// The store reported a failure.
    Failed(String),
}

impl PurchaseOutcome {
    /// Returns whether the purchase granted the entitlement.
    #[must_use]
    pub const fn is_purchased(&self) -> bool {
        matches!(self, Self::Purchased)
    }
}
