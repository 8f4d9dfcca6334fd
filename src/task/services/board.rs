//! Authoritative in-memory task board with background persistence.

use std::sync::{Arc, PoisonError, RwLock};

use crate::storage::writer::SnapshotWriter;
use crate::task::{
    domain::{
        BoardChange, EnrichedTask, PlanMode, Task, TaskBoard, TaskId, bootstrap_tasks,
        incremental_tasks,
    },
    ports::TaskStore,
};
use mockable::Clock;

/// Task board service.
///
/// Reads and mutations work on memory only. Each applied mutation derives
/// the next board under the write lock and schedules a snapshot of it before
/// the lock is released, so saved snapshots follow mutation order. Saves
/// that fail are logged and dropped.
pub struct TaskBoardService<C>
where
    C: Clock + Send + Sync,
{
    board: RwLock<TaskBoard>,
    clock: Arc<C>,
    writer: SnapshotWriter<Vec<Task>>,
}

impl<C> TaskBoardService<C>
where
    C: Clock + Send + Sync,
{
    /// Loads the persisted board and starts the persistence writer.
    ///
    /// A store that fails to load leaves the board empty.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub async fn init<S>(store: Arc<S>, clock: Arc<C>) -> Self
    where
        S: TaskStore + 'static,
    {
        let loaded = match store.load().await {
            Ok(tasks) => tasks,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load tasks, starting empty");
                Vec::new()
            }
        };
        let loaded_count = loaded.len();
        let board = TaskBoard::from_tasks(loaded);
        if board.len() != loaded_count {
            tracing::warn!(
                loaded = loaded_count,
                kept = board.len(),
                "dropped tasks with duplicate ids"
            );
        }
        tracing::info!(tasks = board.len(), "task board initialised");

        let writer = SnapshotWriter::spawn("tasks", move |tasks: Arc<Vec<Task>>| {
            let store = Arc::clone(&store);
            async move {
                if let Err(err) = store.save(&tasks).await {
                    tracing::warn!(error = %err, "failed to save tasks");
                }
            }
        });

        Self {
            board: RwLock::new(board),
            clock,
            writer,
        }
    }

    /// Returns a copy of the whole board.
    #[must_use]
    pub fn snapshot(&self) -> TaskBoard {
        self.read(TaskBoard::clone)
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.read(|board| board.get(id).cloned())
    }

    /// Tasks in focus slots.
    #[must_use]
    pub fn top_tasks(&self) -> Vec<Task> {
        self.read(|board| board.top_tasks().into_iter().cloned().collect())
    }

    /// Backlog tasks.
    #[must_use]
    pub fn bottom_tasks(&self) -> Vec<Task> {
        self.read(|board| board.bottom_tasks().into_iter().cloned().collect())
    }

    /// Completed tasks, most recent first.
    #[must_use]
    pub fn completed_tasks(&self) -> Vec<Task> {
        self.read(|board| board.completed_tasks().into_iter().cloned().collect())
    }

    /// Sum of estimated minutes over the focus slots.
    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        self.read(TaskBoard::total_minutes)
    }

    /// Number of completed tasks.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.read(TaskBoard::completed_count)
    }

    /// Returns whether any focused or backlog task exists.
    #[must_use]
    pub fn has_active_tasks(&self) -> bool {
        self.read(TaskBoard::has_active_tasks)
    }

    /// Appends tasks with the status they carry.
    pub fn add_tasks(&self, tasks: Vec<Task>) -> BoardChange {
        self.update("add_tasks", |board, clock| board.add_tasks(tasks, clock))
    }

    /// Replaces every open task, keeping completed ones.
    pub fn replace_active(&self, tasks: Vec<Task>) -> BoardChange {
        self.update("replace_active", |board, clock| {
            board.replace_active(tasks, clock)
        })
    }

    /// Marks a task completed.
    pub fn complete_task(&self, id: TaskId) -> BoardChange {
        self.update("complete_task", |board, clock| board.complete_task(id, clock))
    }

    /// Moves a task to the backlog.
    pub fn demote_task(&self, id: TaskId) -> BoardChange {
        self.update("demote_task", |board, _| board.demote_task(id))
    }

    /// Removes a task.
    pub fn delete_task(&self, id: TaskId) -> BoardChange {
        self.update("delete_task", |board, _| board.delete_task(id))
    }

    /// Moves a backlog task into a free focus slot.
    pub fn promote_task(&self, id: TaskId) -> BoardChange {
        self.update("promote_task", |board, _| board.promote_task(id))
    }

    /// Exchanges a focused task with a backlog task.
    pub fn swap_tasks(&self, top_id: TaskId, bottom_id: TaskId) -> BoardChange {
        self.update("swap_tasks", |board, _| board.swap_tasks(top_id, bottom_id))
    }

    /// Fills free focus slots from the backlog, promoting at most `count`.
    pub fn add_next_tasks(&self, count: usize) -> BoardChange {
        self.update("add_next_tasks", |board, _| board.add_next_tasks(count))
    }

    /// Removes every completed task.
    pub fn clear_completed(&self) -> BoardChange {
        self.update("clear_completed", |board, _| board.clear_completed())
    }

    /// Merges an enriched batch.
    ///
    /// Bootstrap replaces the open tasks; incremental appends to the backlog
    /// with priorities continuing after the highest open priority at the
    /// moment of merging. Returns the tasks created.
    pub fn merge_plan(&self, mode: PlanMode, enriched: Vec<EnrichedTask>) -> Vec<Task> {
        let mut created = Vec::new();
        self.update("merge_plan", |board, clock| {
            created = match mode {
                PlanMode::Bootstrap => bootstrap_tasks(enriched, clock),
                PlanMode::Incremental => {
                    incremental_tasks(enriched, board.max_active_priority(), clock)
                }
            };
            match mode {
                PlanMode::Bootstrap => board.replace_active(created.clone(), clock),
                PlanMode::Incremental => board.add_tasks(created.clone(), clock),
            }
        });
        created
    }

    /// Waits until the latest board state has been handed to the store.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    fn read<T>(&self, view: impl FnOnce(&TaskBoard) -> T) -> T {
        let board = self.board.read().unwrap_or_else(PoisonError::into_inner);
        view(&*board)
    }

    fn update(
        &self,
        operation: &'static str,
        mutate: impl FnOnce(&mut TaskBoard, &C) -> BoardChange,
    ) -> BoardChange {
        let mut board = self.board.write().unwrap_or_else(PoisonError::into_inner);
        let change = mutate(&mut *board, self.clock.as_ref());
        match &change {
            BoardChange::Applied(ids) => {
                tracing::debug!(operation, changed = ids.len(), "board updated");
                self.writer.schedule(board.tasks().to_vec());
            }
            BoardChange::Unchanged(rejection) => {
                tracing::debug!(operation, ?rejection, "board unchanged");
            }
        }
        change
    }
}
