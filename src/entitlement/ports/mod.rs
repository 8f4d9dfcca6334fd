//! Port contracts for entitlement.

pub mod provider;

pub use provider::{EntitlementError, EntitlementProvider, EntitlementResult};
