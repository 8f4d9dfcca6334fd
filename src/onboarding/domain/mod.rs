//! Domain model for onboarding.

mod state;

pub use state::{OnboardingState, OnboardingStep, ProblemOption};
