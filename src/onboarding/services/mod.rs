//! Application services for onboarding.

mod onboarding;

pub use onboarding::OnboardingService;
