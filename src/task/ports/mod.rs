//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod enrichment;
pub mod store;

pub use enrichment::{EnrichmentError, EnrichmentResult, TaskEnrichmentService};
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
