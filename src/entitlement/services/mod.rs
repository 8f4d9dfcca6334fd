//! Application services for entitlement.

mod gate;

pub use gate::EntitlementService;
