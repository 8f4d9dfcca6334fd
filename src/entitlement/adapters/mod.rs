//! Adapter implementations for entitlement.

pub mod memory;

pub use memory::InMemoryEntitlementProvider;
