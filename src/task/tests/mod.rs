//! Unit tests for the task context.


use crate::task::domain::{Task, TaskStatus};
use chrono::{DateTime, TimeZone, Utc};

/// Fixed instant used to stamp test tasks.
pub(super) fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 6, 9, minute, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Builds a task with the given text, minutes, and status.
pub(super) fn task(text: &str, minutes: u32, status: TaskStatus) -> Task {
    let completed = (status == TaskStatus::Completed).then(|| at(1));
    Task::fixture(text, minutes, status, at(0), completed)
}

/// Builds a completed task finished at `minute`.
pub(super) fn completed_at(text: &str, minute: u32) -> Task {
    Task::fixture(text, 10, TaskStatus::Completed, at(0), Some(at(minute)))
}
