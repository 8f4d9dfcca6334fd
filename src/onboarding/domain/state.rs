//! Persisted onboarding record and the first-run steps.

use serde::{Deserialize, Serialize};

/// What the user said bothers them most, picked on the first screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemOption {
    /// Too much to keep track of.
    TooMuchInHead,
    /// Hard to focus.
    CantFocus,
    /// Putting things off.
    Procrastinating,
    /// Falling behind.
    FeelBehind,
}

/// Screen of the first-run flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OnboardingStep {
    /// Picking a problem.
    #[default]
    Problem,
    /// Typing the first task dump.
    TaskDump,
    /// Waiting for the first plan.
    AiProcessing,
    /// The main task board.
    Main,
}

/// Onboarding record persisted across restarts.
///
/// Missing fields in a stored record take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnboardingState {
    /// Whether the first-run flow has finished.
    pub has_completed_onboarding: bool,
    /// Problem picked on the first screen.
    pub selected_problem: Option<ProblemOption>,
    /// Whether the first plan has been generated.
    pub has_completed_first_plan: bool,
    /// Number of tasks completed over the lifetime of the install.
    pub completed_task_count: u32,
    /// Number of bootstrap plans generated so far.
    pub plan_generation_count: u32,
}

impl OnboardingState {
    /// Returns the step a session starting from this record opens on.
    #[must_use]
    pub const fn initial_step(&self) -> OnboardingStep {
        if self.has_completed_onboarding {
            OnboardingStep::Main
        } else {
            OnboardingStep::Problem
        }
    }
}
