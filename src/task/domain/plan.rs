//! Turning an enriched batch into task records.

use super::{EnrichedTask, FOCUS_SLOTS, MAX_BATCH, Task, TaskBoard, TaskStatus};
use mockable::Clock;

/// How a batch is merged into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanMode {
    /// Replace every open task with a fresh plan.
    Bootstrap,
    /// Append the batch to the backlog.
    Incremental,
}

impl PlanMode {
    /// Picks bootstrap when the board has no open task, incremental
    /// otherwise.
    #[must_use]
    pub fn for_board(board: &TaskBoard) -> Self {
        if board.has_active_tasks() {
            Self::Incremental
        } else {
            Self::Bootstrap
        }
    }

    /// Returns whether the enrichment request carries the initial-load hint.
    #[must_use]
    pub const fn is_initial_load(self) -> bool {
        matches!(self, Self::Bootstrap)
    }
}

/// Builds a fresh plan: the first three records fill the focus slots and the
/// rest go to the backlog, numbered by position from 1.
#[must_use]
pub fn bootstrap_tasks(enriched: Vec<EnrichedTask>, clock: &impl Clock) -> Vec<Task> {
    enriched
        .into_iter()
        .take(MAX_BATCH)
        .zip(1_u32..)
        .enumerate()
        .map(|(index, (record, priority))| {
            let status = if index < FOCUS_SLOTS {
                TaskStatus::Top3
            } else {
                TaskStatus::Bottom
            };
            Task::from_enrichment(record, status, priority, clock)
        })
        .collect()
}

/// Builds backlog tasks whose priorities continue after
/// `after_priority`.
#[must_use]
pub fn incremental_tasks(
    enriched: Vec<EnrichedTask>,
    after_priority: u32,
    clock: &impl Clock,
) -> Vec<Task> {
    enriched
        .into_iter()
        .take(MAX_BATCH)
        .zip(after_priority.saturating_add(1)..)
        .map(|(record, priority)| Task::from_enrichment(record, TaskStatus::Bottom, priority, clock))
        .collect()
}
