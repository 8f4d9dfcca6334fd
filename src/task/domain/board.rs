//! The task board: the full task collection and its status transitions.
//!
//! Every operation either applies completely or leaves the board untouched,
//! and reports which of the two happened through [`BoardChange`]. Nothing
//! here fails with an error: a missing id or a full set of focus slots is a
//! no-op, so replaying an operation is always safe.

use super::{Task, TaskId, TaskStatus};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of focus slots.
pub const FOCUS_SLOTS: usize = 3;

/// Result of a board operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardChange {
    /// The board changed; lists the tasks whose membership changed.
    Applied(Vec<TaskId>),
    /// The board was left untouched.
    Unchanged(Rejection),
}

impl BoardChange {
    /// Returns whether the operation changed the board.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Returns the affected task ids, empty when unchanged.
    #[must_use]
    pub fn affected(&self) -> &[TaskId] {
        match self {
            Self::Applied(ids) => ids,
            Self::Unchanged(_) => &[],
        }
    }
}

/// Reason a board operation was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No task has this id.
    TaskNotFound(TaskId),
    /// All focus slots are taken.
    FocusSlotsFull,
    /// The task already occupies a focus slot.
    AlreadyFocused(TaskId),
    /// The task is already in the backlog.
    AlreadyInBacklog(TaskId),
    /// The task is completed and can only be deleted.
    AlreadyCompleted(TaskId),
    /// The task was expected in a focus slot.
    NotFocused(TaskId),
    /// The task was expected in the backlog.
    NotInBacklog(TaskId),
    /// The backlog is empty.
    NothingToPromote,
    /// There are no completed tasks.
    NothingToClear,
    /// The input held no task that could be added.
    NothingToAdd,
}

/// Authoritative task collection in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    /// Creates an empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Rebuilds a board from persisted tasks, keeping the first task seen for
    /// each id.
    ///
    /// Stored data is repaired rather than trusted. Focused tasks beyond
    /// [`FOCUS_SLOTS`] go to the backlog, open tasks lose any completion
    /// time, and completed tasks without one take their creation time.
    #[must_use]
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut seen = HashSet::new();
        let mut focused = 0;
        let mut unique = Vec::new();
        for mut task in tasks {
            if !seen.insert(task.id()) {
                continue;
            }
            match task.status() {
                TaskStatus::Top3 if focused >= FOCUS_SLOTS => {
                    tracing::debug!(task_id = %task.id(), "too many focused tasks, moving to backlog");
                    task.move_to(TaskStatus::Bottom);
                }
                TaskStatus::Top3 => {
                    focused += 1;
                    task.move_to(TaskStatus::Top3);
                }
                TaskStatus::Bottom => task.move_to(TaskStatus::Bottom),
                TaskStatus::Completed => {
                    let at = task.completed_at().unwrap_or_else(|| task.created_at());
                    task.complete(at);
                }
            }
            unique.push(task);
        }
        Self { tasks: unique }
    }

    /// Returns every task in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Consumes the board, returning its tasks in insertion order.
    #[must_use]
    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether the board holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in focus slots, in insertion order.
    #[must_use]
    pub fn top_tasks(&self) -> Vec<&Task> {
        self.with_status(TaskStatus::Top3)
    }

    /// Backlog tasks, in insertion order.
    #[must_use]
    pub fn bottom_tasks(&self) -> Vec<&Task> {
        self.with_status(TaskStatus::Bottom)
    }

    /// Completed tasks, most recently completed first.
    #[must_use]
    pub fn completed_tasks(&self) -> Vec<&Task> {
        let mut completed = self.with_status(TaskStatus::Completed);
        completed.sort_by(|a, b| b.completed_at().cmp(&a.completed_at()));
        completed
    }

    /// Sum of estimated minutes over the focus slots.
    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        self.tasks
            .iter()
            .filter(|task| task.status() == TaskStatus::Top3)
            .map(Task::estimated_minutes)
            .sum()
    }

    /// Number of occupied focus slots.
    #[must_use]
    pub fn focus_count(&self) -> usize {
        self.count(TaskStatus::Top3)
    }

    /// Number of completed tasks.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.count(TaskStatus::Completed)
    }

    /// Returns whether any task is still open (focused or in the backlog).
    #[must_use]
    pub fn has_active_tasks(&self) -> bool {
        self.tasks.iter().any(|task| !task.status().is_terminal())
    }

    /// Highest priority among open tasks, or zero when there are none.
    #[must_use]
    pub fn max_active_priority(&self) -> u32 {
        self.tasks
            .iter()
            .filter(|task| !task.status().is_terminal())
            .map(Task::priority)
            .max()
            .unwrap_or(0)
    }

    /// Appends tasks with the status they carry.
    ///
    /// Tasks whose id is already on the board are skipped. A focused task
    /// that arrives when every focus slot is taken goes to the backlog
    /// instead, and a completed task without a completion time is stamped
    /// with the current time.
    pub fn add_tasks(
        &mut self,
        tasks: impl IntoIterator<Item = Task>,
        clock: &impl Clock,
    ) -> BoardChange {
        let mut added = Vec::new();
        for mut task in tasks {
            if self.get(task.id()).is_some() {
                tracing::debug!(task_id = %task.id(), "skipping task with duplicate id");
                continue;
            }
            match task.status() {
                TaskStatus::Top3 if self.focus_count() >= FOCUS_SLOTS => {
                    tracing::debug!(task_id = %task.id(), "focus slots full, adding to backlog");
                    task.move_to(TaskStatus::Bottom);
                }
                TaskStatus::Completed if task.completed_at().is_none() => {
                    task.complete(clock.utc());
                }
                _ => {}
            }
            added.push(task.id());
            self.tasks.push(task);
        }
        if added.is_empty() {
            return BoardChange::Unchanged(Rejection::NothingToAdd);
        }
        BoardChange::Applied(added)
    }

    /// Replaces every open task with `tasks`, keeping completed ones.
    ///
    /// The same focus-slot and duplicate-id rules as [`Self::add_tasks`]
    /// apply to the incoming tasks.
    pub fn replace_active(
        &mut self,
        tasks: impl IntoIterator<Item = Task>,
        clock: &impl Clock,
    ) -> BoardChange {
        self.tasks.retain(|task| task.status().is_terminal());
        self.add_tasks(tasks, clock)
    }

    /// Marks a task completed and records when.
    pub fn complete_task(&mut self, id: TaskId, clock: &impl Clock) -> BoardChange {
        let Some(task) = self.task_mut(id) else {
            return BoardChange::Unchanged(Rejection::TaskNotFound(id));
        };
        if task.status().is_terminal() {
            return BoardChange::Unchanged(Rejection::AlreadyCompleted(id));
        }
        task.complete(clock.utc());
        BoardChange::Applied(vec![id])
    }

    /// Moves a task to the backlog.
    pub fn demote_task(&mut self, id: TaskId) -> BoardChange {
        let Some(task) = self.task_mut(id) else {
            return BoardChange::Unchanged(Rejection::TaskNotFound(id));
        };
        match task.status() {
            TaskStatus::Completed => BoardChange::Unchanged(Rejection::AlreadyCompleted(id)),
            TaskStatus::Bottom => BoardChange::Unchanged(Rejection::AlreadyInBacklog(id)),
            TaskStatus::Top3 => {
                task.move_to(TaskStatus::Bottom);
                BoardChange::Applied(vec![id])
            }
        }
    }

    /// Removes a task from the board.
    pub fn delete_task(&mut self, id: TaskId) -> BoardChange {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id() != id);
        if self.tasks.len() == before {
            return BoardChange::Unchanged(Rejection::TaskNotFound(id));
        }
        BoardChange::Applied(vec![id])
    }

    /// Moves a backlog task into a free focus slot.
    pub fn promote_task(&mut self, id: TaskId) -> BoardChange {
        let focused = self.focus_count();
        let Some(task) = self.task_mut(id) else {
            return BoardChange::Unchanged(Rejection::TaskNotFound(id));
        };
        match task.status() {
            TaskStatus::Top3 => BoardChange::Unchanged(Rejection::AlreadyFocused(id)),
            TaskStatus::Completed => BoardChange::Unchanged(Rejection::AlreadyCompleted(id)),
            TaskStatus::Bottom if focused >= FOCUS_SLOTS => {
                BoardChange::Unchanged(Rejection::FocusSlotsFull)
            }
            TaskStatus::Bottom => {
                task.move_to(TaskStatus::Top3);
                BoardChange::Applied(vec![id])
            }
        }
    }

    /// Exchanges a focused task with a backlog task in one step.
    ///
    /// Both ids are checked before anything moves; if either is missing or
    /// not where it is expected, neither task changes.
    pub fn swap_tasks(&mut self, top_id: TaskId, bottom_id: TaskId) -> BoardChange {
        if let Err(rejection) = self.expect_status(top_id, TaskStatus::Top3) {
            return BoardChange::Unchanged(rejection);
        }
        if let Err(rejection) = self.expect_status(bottom_id, TaskStatus::Bottom) {
            return BoardChange::Unchanged(rejection);
        }
        for task in &mut self.tasks {
            if task.id() == top_id {
                task.move_to(TaskStatus::Bottom);
            } else if task.id() == bottom_id {
                task.move_to(TaskStatus::Top3);
            }
        }
        BoardChange::Applied(vec![top_id, bottom_id])
    }

    /// Fills free focus slots from the front of the backlog, promoting at
    /// most `count` tasks.
    pub fn add_next_tasks(&mut self, count: usize) -> BoardChange {
        let slots_available = FOCUS_SLOTS.saturating_sub(self.focus_count());
        if slots_available == 0 {
            return BoardChange::Unchanged(Rejection::FocusSlotsFull);
        }
        let mut remaining = slots_available.min(count);
        let mut promoted = Vec::new();
        for task in &mut self.tasks {
            if remaining == 0 {
                break;
            }
            if task.status() == TaskStatus::Bottom {
                task.move_to(TaskStatus::Top3);
                promoted.push(task.id());
                remaining -= 1;
            }
        }
        if promoted.is_empty() {
            return BoardChange::Unchanged(Rejection::NothingToPromote);
        }
        BoardChange::Applied(promoted)
    }

    /// Removes every completed task.
    pub fn clear_completed(&mut self) -> BoardChange {
        let removed: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|task| task.status().is_terminal())
            .map(Task::id)
            .collect();
        if removed.is_empty() {
            return BoardChange::Unchanged(Rejection::NothingToClear);
        }
        self.tasks.retain(|task| !task.status().is_terminal());
        BoardChange::Applied(removed)
    }

    fn with_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.status() == status)
            .collect()
    }

    fn count(&self, status: TaskStatus) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.status() == status)
            .count()
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    fn expect_status(&self, id: TaskId, expected: TaskStatus) -> Result<(), Rejection> {
        let task = self.get(id).ok_or(Rejection::TaskNotFound(id))?;
        if task.status() == expected {
            return Ok(());
        }
        Err(match expected {
            TaskStatus::Top3 => Rejection::NotFocused(id),
            TaskStatus::Bottom => Rejection::NotInBacklog(id),
            TaskStatus::Completed => Rejection::AlreadyCompleted(id),
        })
    }
}
