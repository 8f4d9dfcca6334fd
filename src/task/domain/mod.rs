//! Domain model for the task board.
//!
//! Tasks live in three lists (focus slots, backlog, completed). The
//! [`TaskBoard`] owns every transition between them; plan building turns an
//! enriched batch into task records for a bootstrap or incremental merge.

mod board;
mod enrichment;
mod error;
mod ids;
mod plan;
mod task;

pub use board::{BoardChange, FOCUS_SLOTS, Rejection, TaskBoard};
pub use enrichment::{EnrichedTask, EnrichmentRequest, EnrichmentResponse, MAX_BATCH, RawTaskBatch};
pub use error::TaskDomainError;
pub use ids::{SubmissionId, TaskId};
pub use plan::{PlanMode, bootstrap_tasks, incremental_tasks};
pub use task::{Task, TaskStatus};
