//! Unit tests for the entitlement context.
