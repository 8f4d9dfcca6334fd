//! Depth-1, latest-wins persistence queue.
//!
//! Every state change schedules a full snapshot. A single background task
//! saves snapshots one at a time; snapshots scheduled while a save is in
//! flight collapse into the most recent one. Once the queue is idle the
//! durable copy equals the last scheduled snapshot.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

type Pending<T> = Option<(u64, Arc<T>)>;

/// Handle used to schedule snapshot saves.
#[derive(Debug)]
pub struct SnapshotWriter<T> {
    pending: watch::Sender<Pending<T>>,
    persisted: watch::Receiver<u64>,
    scheduled: Mutex<u64>,
}

impl<T> SnapshotWriter<T>
where
    T: Send + Sync + 'static,
{
    /// Spawns the background saver on the current tokio runtime.
    ///
    /// `save` is called with each snapshot that survives coalescing. It is
    /// responsible for reporting its own failures; the queue moves on either
    /// way.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn<F, Fut>(label: &'static str, save: F) -> Self
    where
        F: Fn(Arc<T>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (pending_tx, mut pending_rx) = watch::channel::<Pending<T>>(None);
        let (persisted_tx, persisted_rx) = watch::channel(0_u64);
        tokio::spawn(async move {
            while pending_rx.changed().await.is_ok() {
                let Some((version, snapshot)) = pending_rx.borrow_and_update().clone() else {
                    continue;
                };
                save(snapshot).await;
                tracing::trace!(writer = label, version, "snapshot persisted");
                persisted_tx.send_replace(version);
            }
            tracing::debug!(writer = label, "snapshot writer stopped");
        });
        Self {
            pending: pending_tx,
            persisted: persisted_rx,
            scheduled: Mutex::new(0),
        }
    }

    /// Schedules `snapshot` to be saved, replacing any snapshot still
    /// waiting.
    pub fn schedule(&self, snapshot: T) {
        let mut scheduled = self
            .scheduled
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *scheduled += 1;
        self.pending
            .send_replace(Some((*scheduled, Arc::new(snapshot))));
    }

    /// Waits until every snapshot scheduled so far has been saved or
    /// superseded by a saved one.
    pub async fn flush(&self) {
        let target = *self
            .scheduled
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut persisted = self.persisted.clone();
        let reached = persisted
            .wait_for(|version| *version >= target)
            .await
            .map(|_| ());
        if reached.is_err() {
            tracing::warn!("snapshot writer stopped before flush completed");
        }
    }
}
