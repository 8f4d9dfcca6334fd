//! Durable key-value storage for opaque JSON blobs.
//!
//! - Port contract in [`ports`]
//! - In-memory and directory-backed adapters in [`adapters`]
//! - The latest-wins persistence queue in [`writer`]

pub mod adapters;
pub mod ports;
pub mod writer;

#[cfg(test)]
mod tests;
