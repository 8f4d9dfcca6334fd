//! Onboarding state holder with background persistence.

use std::sync::{Arc, PoisonError, RwLock};

use crate::onboarding::{
    domain::{OnboardingState, OnboardingStep, ProblemOption},
    ports::OnboardingStore,
};
use crate::storage::writer::SnapshotWriter;

#[derive(Debug)]
struct Session {
    state: OnboardingState,
    step: OnboardingStep,
}

/// Tracks the first-run flow and how many plans have been generated.
///
/// The current step lives in memory only; the record is saved after every
/// change.
pub struct OnboardingService {
    session: RwLock<Session>,
    writer: SnapshotWriter<OnboardingState>,
}

impl OnboardingService {
    /// Loads the stored record and starts the persistence writer.
    ///
    /// A store that fails to load leaves the default record in place.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub async fn init<S>(store: Arc<S>) -> Self
    where
        S: OnboardingStore + 'static,
    {
        let state = match store.load().await {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load onboarding state, using defaults");
                OnboardingState::default()
            }
        };
        let step = state.initial_step();
        tracing::info!(?step, plans = state.plan_generation_count, "onboarding initialised");

        let writer = SnapshotWriter::spawn("onboarding", move |state: Arc<OnboardingState>| {
            let store = Arc::clone(&store);
            async move {
                if let Err(err) = store.save(&state).await {
                    tracing::warn!(error = %err, "failed to save onboarding state");
                }
            }
        });

        Self {
            session: RwLock::new(Session { state, step }),
            writer,
        }
    }

    /// Returns a copy of the onboarding record.
    #[must_use]
    pub fn state(&self) -> OnboardingState {
        self.read(|session| session.state.clone())
    }

    /// Returns the current step.
    #[must_use]
    pub fn current_step(&self) -> OnboardingStep {
        self.read(|session| session.step)
    }

    /// Returns whether the first-run flow has finished.
    #[must_use]
    pub fn has_completed_onboarding(&self) -> bool {
        self.read(|session| session.state.has_completed_onboarding)
    }

    /// Moves to `step` without touching the record.
    pub fn set_current_step(&self, step: OnboardingStep) {
        let mut session = self.session.write().unwrap_or_else(PoisonError::into_inner);
        session.step = step;
    }

    /// Records the picked problem and moves on to the task dump.
    pub fn select_problem(&self, problem: Option<ProblemOption>) {
        self.update(|session| {
            session.state.selected_problem = problem;
            session.step = OnboardingStep::TaskDump;
        });
    }

    /// Marks the first-run flow and first plan as done and opens the board.
    pub fn complete_onboarding(&self) {
        self.update(|session| {
            session.state.has_completed_onboarding = true;
            session.state.has_completed_first_plan = true;
            session.state.plan_generation_count = 1;
            session.step = OnboardingStep::Main;
        });
    }

    /// Counts one more generated plan and returns the new total.
    pub fn increment_plan_count(&self) -> u32 {
        self.update(|session| {
            session.state.plan_generation_count =
                session.state.plan_generation_count.saturating_add(1);
            session.state.plan_generation_count
        })
    }

    /// Counts one more completed task and returns the new total.
    pub fn record_completion(&self) -> u32 {
        self.update(|session| {
            session.state.completed_task_count =
                session.state.completed_task_count.saturating_add(1);
            session.state.completed_task_count
        })
    }

    /// Waits until the latest record has been handed to the store.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    fn read<T>(&self, view: impl FnOnce(&Session) -> T) -> T {
        let session = self.session.read().unwrap_or_else(PoisonError::into_inner);
        view(&*session)
    }

    fn update<T>(&self, mutate: impl FnOnce(&mut Session) -> T) -> T {
        let mut session = self.session.write().unwrap_or_else(PoisonError::into_inner);
        let result = mutate(&mut *session);
        self.writer.schedule(session.state.clone());
        result
    }
}
