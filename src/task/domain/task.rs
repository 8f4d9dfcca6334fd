//! Task record and its list-membership status.

use super::{EnrichedTask, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// List membership of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task occupies one of the focus slots.
    Top3,
    /// Task waits in the backlog.
    Bottom,
    /// Task has been completed.
    Completed,
}

impl TaskStatus {
    /// Returns whether the status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// A unit of work produced by enrichment.
///
/// Everything except the status (and the completion timestamp that goes
/// with it) is fixed at creation. Status changes go through
/// [`TaskBoard`](super::TaskBoard) so the focus-slot cap is enforced in one
/// place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    text: String,
    estimated_minutes: u32,
    goal: String,
    rule: String,
    do_this: String,
    priority: u32,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task from an enriched record.
    #[must_use]
    pub fn from_enrichment(
        enriched: EnrichedTask,
        status: TaskStatus,
        priority: u32,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            text: enriched.text,
            estimated_minutes: enriched.estimated_minutes,
            goal: enriched.goal,
            rule: enriched.rule,
            do_this: enriched.do_this,
            priority,
            status,
            created_at: timestamp,
            completed_at: (status == TaskStatus::Completed).then_some(timestamp),
        }
    }

    /// Builds a task with fixed timestamps for tests.
    #[cfg(test)]
    pub(crate) fn fixture(
        text: &str,
        estimated_minutes: u32,
        status: TaskStatus,
        created_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: TaskId::new(),
            text: text.to_owned(),
            estimated_minutes,
            goal: String::new(),
            rule: String::new(),
            do_this: String::new(),
            priority: 1,
            status,
            created_at,
            completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task description.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the estimated duration in minutes.
    #[must_use]
    pub const fn estimated_minutes(&self) -> u32 {
        self.estimated_minutes
    }

    /// Returns the goal phrase.
    #[must_use]
    pub fn goal(&self) -> &str {
        &self.goal
    }

    /// Returns the focus rule.
    #[must_use]
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Returns the first concrete action.
    #[must_use]
    pub fn do_this(&self) -> &str {
        &self.do_this
    }

    /// Returns the initial ordering hint.
    #[must_use]
    pub const fn priority(&self) -> u32 {
        self.priority
    }

    /// Returns the list membership.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp, if the task is completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Moves an open task between the focus slots and the backlog.
    pub(crate) fn move_to(&mut self, status: TaskStatus) {
        self.status = status;
        self.completed_at = None;
    }

    pub(crate) fn complete(&mut self, at: DateTime<Utc>) {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(at);
    }
}
