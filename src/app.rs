//! Service graph wiring the task board, planning, onboarding, and the paywall.
//!
//! [`FocusApp`] is built once at startup and owns every service. Board
//! mutations go through it so the paywall lock and plan bookkeeping stay in
//! one place.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;

use crate::config::AppConfig;
use crate::entitlement::{
    domain::{PaywallSignal, PurchaseOutcome},
    ports::{EntitlementProvider, EntitlementResult},
    services::EntitlementService,
};
use crate::onboarding::{adapters::KeyValueOnboardingStore, services::OnboardingService};
use crate::storage::ports::KeyValueStore;
use crate::task::{
    adapters::KeyValueTaskStore,
    domain::{BoardChange, FOCUS_SLOTS, PlanMode, TaskId},
    ports::TaskEnrichmentService,
    services::{PlanOutcome, PlanRequest, PlanningError, PlanningService, TaskBoardService},
};

/// Errors returned by [`FocusApp`].
#[derive(Debug, Error)]
pub enum AppError {
    /// The paywall is shown and the user holds no entitlement.
    #[error("the board is locked until the subscription is active")]
    Locked,

    /// Planning failed.
    #[error(transparent)]
    Planning(#[from] PlanningError),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Outcome of completing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// What happened to the board.
    pub change: BoardChange,
    /// What the paywall should do in response.
    pub paywall: PaywallSignal,
}

/// Collaborators needed to build a [`FocusApp`].
pub struct AppParts<K, E, P, C> {
    /// Blob store backing tasks and onboarding.
    pub store: Arc<K>,
    /// Task enrichment service.
    pub enrichment: Arc<E>,
    /// Entitlement provider.
    pub entitlement: Arc<P>,
    /// Clock used for task timestamps.
    pub clock: Arc<C>,
    /// Runtime configuration.
    pub config: AppConfig,
}

/// The application service graph.
pub struct FocusApp<E, P, C>
where
    E: TaskEnrichmentService,
    P: EntitlementProvider,
    C: Clock + Send + Sync,
{
    board: Arc<TaskBoardService<C>>,
    planner: PlanningService<E, C>,
    onboarding: OnboardingService,
    entitlement: EntitlementService<P>,
}

impl<E, P, C> FocusApp<E, P, C>
where
    E: TaskEnrichmentService,
    P: EntitlementProvider,
    C: Clock + Send + Sync,
{
    /// Loads persisted state and builds every service.
    ///
    /// The paywall gate is primed with the loaded completed count, so a
    /// board that already crossed the threshold starts locked for users
    /// without the entitlement.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub async fn init<K>(parts: AppParts<K, E, P, C>) -> Self
    where
        K: KeyValueStore + 'static,
    {
        let AppParts {
            store,
            enrichment,
            entitlement,
            clock,
            config,
        } = parts;

        let task_store = Arc::new(KeyValueTaskStore::with_key(
            Arc::clone(&store),
            config.tasks_key.clone(),
        ));
        let onboarding_store = Arc::new(KeyValueOnboardingStore::with_key(
            store,
            config.onboarding_key.clone(),
        ));

        let board = Arc::new(TaskBoardService::init(task_store, clock).await);
        let onboarding = OnboardingService::init(onboarding_store).await;
        let planner = PlanningService::new(Arc::clone(&board), enrichment);
        let entitlement = EntitlementService::new(entitlement, config.paywall_threshold);
        entitlement.observe(board.completed_count());

        Self {
            board,
            planner,
            onboarding,
            entitlement,
        }
    }

    /// Returns the task board.
    #[must_use]
    pub fn board(&self) -> &TaskBoardService<C> {
        &self.board
    }

    /// Returns the planning service.
    #[must_use]
    pub const fn planner(&self) -> &PlanningService<E, C> {
        &self.planner
    }

    /// Returns the onboarding service.
    #[must_use]
    pub const fn onboarding(&self) -> &OnboardingService {
        &self.onboarding
    }

    /// Returns the entitlement service.
    #[must_use]
    pub const fn entitlement(&self) -> &EntitlementService<P> {
        &self.entitlement
    }

    /// Returns whether the paywall blocks board interaction.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.entitlement.is_locked()
    }

    /// Enriches and merges a batch of raw tasks.
    ///
    /// A bootstrap merge after the first-run flow counts as a newly
    /// generated plan.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Locked`] while the paywall blocks the board and
    /// [`AppError::Planning`] when the submission fails.
    pub async fn submit_tasks(&self, request: &PlanRequest) -> AppResult<PlanOutcome> {
        self.ensure_unlocked()?;
        let outcome = self.planner.submit(request).await?;
        if matches!(
            outcome,
            PlanOutcome::Merged {
                mode: PlanMode::Bootstrap,
                ..
            }
        ) && self.onboarding.has_completed_onboarding()
        {
            let plans = self.onboarding.increment_plan_count();
            tracing::info!(plans, "new plan generated");
        }
        Ok(outcome)
    }

    /// Finishes the first-run flow.
    pub fn finish_onboarding(&self) {
        self.onboarding.complete_onboarding();
    }

    /// Completes a task and reports how the paywall reacts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Locked`] while the paywall blocks the board.
    pub fn complete_task(&self, id: TaskId) -> AppResult<Completion> {
        self.ensure_unlocked()?;
        let change = self.board.complete_task(id);
        let paywall = if change.is_applied() {
            self.onboarding.record_completion();
            self.entitlement.observe(self.board.completed_count())
        } else {
            PaywallSignal::Unchanged
        };
        Ok(Completion { change, paywall })
    }

    /// Moves a focus task back to the backlog.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Locked`] while the paywall blocks the board.
    pub fn demote_task(&self, id: TaskId) -> AppResult<BoardChange> {
        self.ensure_unlocked()?;
        Ok(self.board.demote_task(id))
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Locked`] while the paywall blocks the board.
    pub fn delete_task(&self, id: TaskId) -> AppResult<BoardChange> {
        self.ensure_unlocked()?;
        Ok(self.board.delete_task(id))
    }

    /// Moves a backlog task into a free focus slot.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Locked`] while the paywall blocks the board.
    pub fn promote_task(&self, id: TaskId) -> AppResult<BoardChange> {
        self.ensure_unlocked()?;
        Ok(self.board.promote_task(id))
    }

    /// Exchanges a focus task with a backlog task.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Locked`] while the paywall blocks the board.
    pub fn swap_tasks(&self, top_id: TaskId, bottom_id: TaskId) -> AppResult<BoardChange> {
        self.ensure_unlocked()?;
        Ok(self.board.swap_tasks(top_id, bottom_id))
    }

    /// Fills the focus list from the backlog.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Locked`] while the paywall blocks the board.
    pub fn add_next_tasks(&self) -> AppResult<BoardChange> {
        self.ensure_unlocked()?;
        Ok(self.board.add_next_tasks(FOCUS_SLOTS))
    }

    /// Drops every completed task.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Locked`] while the paywall blocks the board.
    pub fn clear_completed(&self) -> AppResult<BoardChange> {
        self.ensure_unlocked()?;
        Ok(self.board.clear_completed())
    }

    /// Buys `product_id`.
    pub async fn purchase(&self, product_id: &str) -> PurchaseOutcome {
        self.entitlement.purchase(product_id).await
    }

    /// Restores earlier purchases.
    ///
    /// # Errors
    ///
    /// Returns the provider's error when restore cannot complete.
    pub async fn restore(&self) -> EntitlementResult<bool> {
        self.entitlement.restore().await
    }

    /// Waits until tasks and onboarding state have reached the store.
    pub async fn flush(&self) {
        self.board.flush().await;
        self.onboarding.flush().await;
    }

    fn ensure_unlocked(&self) -> AppResult<()> {
        if self.entitlement.is_locked() {
            tracing::debug!("board interaction blocked by paywall");
            return Err(AppError::Locked);
        }
        Ok(())
    }
}
