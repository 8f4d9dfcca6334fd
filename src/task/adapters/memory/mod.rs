//! In-memory adapters for tests and local sessions.

mod enrichment;
mod store;

pub use enrichment::ScriptedEnrichmentService;
pub use store::InMemoryTaskStore;
