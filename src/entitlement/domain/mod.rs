//! Domain model for entitlement gating.

mod paywall;
mod purchase;

pub use paywall::{PAYWALL_TRIGGER_COUNT, PaywallGate, PaywallSignal};
pub use purchase::PurchaseOutcome;
