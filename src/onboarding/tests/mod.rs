//! Unit tests for the onboarding context.
