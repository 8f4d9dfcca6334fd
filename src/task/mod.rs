//! The task board: focus slots, backlog, and completed history.
//!
//! Tasks are created only by merging an enriched batch and move between
//! the three lists through the board's transition operations. At most
//! three tasks are ever focused. The module follows hexagonal architecture:
//!
//! - Domain types and the board state machine in [`domain`]
//! - Port contracts for persistence and enrichment in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The board and planning services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
