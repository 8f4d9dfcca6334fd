//! Subscription entitlement and the completion paywall.
//!
//! - Domain types, including the paywall gate, in [`domain`]
//! - The entitlement provider port in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The entitlement service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
