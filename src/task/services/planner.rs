//! Enrichment orchestration: raw text in, merged plan out.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::task::{
    domain::{
        EnrichmentRequest, MAX_BATCH, PlanMode, RawTaskBatch, SubmissionId, Task, TaskDomainError,
    },
    ports::{EnrichmentError, TaskEnrichmentService},
    services::TaskBoardService,
};
use mockable::Clock;
use thiserror::Error;

/// One submission of raw task text.
///
/// The request owns the raw input and an idempotency token. Keep it around
/// after a failure and submit it again to retry; once a submission has been
/// merged, submitting it again is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    submission_id: SubmissionId,
    batch: RawTaskBatch,
    start_fresh: bool,
}

impl PlanRequest {
    /// Parses free text into a request, one task per non-blank line.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyInput`] when no line has content.
    pub fn parse(input: &str) -> Result<Self, TaskDomainError> {
        RawTaskBatch::parse(input).map(Self::new)
    }

    /// Creates a request for an already parsed batch.
    #[must_use]
    pub fn new(batch: RawTaskBatch) -> Self {
        Self {
            submission_id: SubmissionId::new(),
            batch,
            start_fresh: false,
        }
    }

    /// Forces a bootstrap merge even when open tasks exist.
    #[must_use]
    pub fn start_fresh(mut self) -> Self {
        self.start_fresh = true;
        self
    }

    /// Overrides the idempotency token.
    #[must_use]
    pub fn with_submission_id(mut self, submission_id: SubmissionId) -> Self {
        self.submission_id = submission_id;
        self
    }

    /// Returns the idempotency token.
    #[must_use]
    pub const fn submission_id(&self) -> SubmissionId {
        self.submission_id
    }

    /// Returns the raw input.
    #[must_use]
    pub const fn batch(&self) -> &RawTaskBatch {
        &self.batch
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// The batch was merged.
    Merged {
        /// How the batch was merged.
        mode: PlanMode,
        /// Tasks created by the merge, in priority order.
        tasks: Vec<Task>,
    },
    /// The submission had already been merged; nothing changed.
    AlreadyApplied(SubmissionId),
}

/// Errors returned by the planning service.
#[derive(Debug, Error)]
pub enum PlanningError {
    /// Another submission is still waiting for enrichment.
    #[error("a plan request is already in flight")]
    InFlight,

    /// The enrichment service is missing configuration; retrying will not
    /// help.
    #[error("task enrichment is not configured: {0}")]
    NotConfigured(String),

    /// Enrichment failed; the board is unchanged and the request can be
    /// retried.
    #[error("could not generate a plan")]
    EnrichmentFailed(#[source] EnrichmentError),
}

impl From<EnrichmentError> for PlanningError {
    fn from(err: EnrichmentError) -> Self {
        match err {
            EnrichmentError::NotConfigured(reason) => Self::NotConfigured(reason),
            other => Self::EnrichmentFailed(other),
        }
    }
}

/// Number of merged submission ids remembered for replay detection.
///
/// The ids live in memory only, so a replay is recognised within one
/// process and only while the submission is among the most recent ones.
pub const REMEMBERED_SUBMISSIONS: usize = 32;

/// Result type for planning operations.
pub type PlanningResult<T> = Result<T, PlanningError>;

/// Enrichment orchestrator.
///
/// Picks the merge mode, calls the enrichment service, and merges the
/// result into the board. Only one submission runs at a time. Dropping the
/// future returned by [`Self::submit`] before it completes merges nothing.
pub struct PlanningService<E, C>
where
    E: TaskEnrichmentService,
    C: Clock + Send + Sync,
{
    board: Arc<TaskBoardService<C>>,
    enrichment: Arc<E>,
    in_flight: AtomicBool,
    applied: Mutex<VecDeque<SubmissionId>>,
}

impl<E, C> PlanningService<E, C>
where
    E: TaskEnrichmentService,
    C: Clock + Send + Sync,
{
    /// Creates a planning service over `board`.
    #[must_use]
    pub fn new(board: Arc<TaskBoardService<C>>, enrichment: Arc<E>) -> Self {
        Self {
            board,
            enrichment,
            in_flight: AtomicBool::new(false),
            applied: Mutex::new(VecDeque::with_capacity(REMEMBERED_SUBMISSIONS)),
        }
    }

    /// Returns whether a submission is waiting for enrichment.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Enriches and merges `request`.
    ///
    /// Bootstrap mode is used when the board has no open task or the request
    /// asks to start fresh; otherwise the batch is appended to the backlog.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::InFlight`] while another submission runs,
    /// [`PlanningError::NotConfigured`] when enrichment has no
    /// configuration, and [`PlanningError::EnrichmentFailed`] for every
    /// other enrichment failure. The board is unchanged in all three cases.
    pub async fn submit(&self, request: &PlanRequest) -> PlanningResult<PlanOutcome> {
        let submission_id = request.submission_id();
        if self.was_applied(submission_id) {
            tracing::info!(submission = %submission_id, "submission already merged");
            return Ok(PlanOutcome::AlreadyApplied(submission_id));
        }
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(PlanningError::InFlight)?;

        let mode = if request.start_fresh || !self.board.has_active_tasks() {
            PlanMode::Bootstrap
        } else {
            PlanMode::Incremental
        };
        tracing::info!(
            submission = %submission_id,
            ?mode,
            lines = request.batch.len(),
            "requesting enrichment"
        );

        let enrichment_request = EnrichmentRequest::new(&request.batch, mode.is_initial_load());
        let mut records = match self.enrichment.enrich(enrichment_request).await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(
                    submission = %submission_id,
                    error = %err,
                    transient = err.is_transient(),
                    "enrichment failed"
                );
                return Err(err.into());
            }
        };
        if records.is_empty() {
            tracing::warn!(submission = %submission_id, "enrichment returned no tasks");
            return Err(EnrichmentError::Empty.into());
        }
        if records.len() > MAX_BATCH {
            tracing::debug!(
                submission = %submission_id,
                returned = records.len(),
                kept = MAX_BATCH,
                "truncating oversized batch"
            );
            records.truncate(MAX_BATCH);
        }
        if let Some(invalid) = records.iter().find_map(|record| record.validate().err()) {
            tracing::warn!(submission = %submission_id, error = %invalid, "enrichment returned an invalid task");
            return Err(EnrichmentError::Malformed(invalid.to_string()).into());
        }

        let tasks = self.board.merge_plan(mode, records);
        self.mark_applied(submission_id);
        tracing::info!(submission = %submission_id, ?mode, created = tasks.len(), "plan merged");
        Ok(PlanOutcome::Merged { mode, tasks })
    }

    fn was_applied(&self, submission_id: SubmissionId) -> bool {
        self.applied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&submission_id)
    }

    fn mark_applied(&self, submission_id: SubmissionId) {
        let mut applied = self.applied.lock().unwrap_or_else(PoisonError::into_inner);
        if applied.len() == REMEMBERED_SUBMISSIONS {
            applied.pop_front();
        }
        applied.push_back(submission_id);
    }
}

/// Holds the in-flight flag; releasing happens on drop so a cancelled
/// submission frees the slot too.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
