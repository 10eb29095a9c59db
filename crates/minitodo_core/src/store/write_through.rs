//! Asynchronous snapshot write-through worker.
//!
//! # Responsibility
//! - Persist full collection snapshots off the mutating caller's thread.
//! - Preserve mutation order: snapshots are applied first-in first-out.
//!
//! # Invariants
//! - The worker owns the repository; no other thread touches it after
//!   startup seeding.
//! - A failed write is logged and skipped, never retried and never
//!   surfaced to the mutating caller (durability is best-effort; the
//!   in-memory state stays authoritative for the process lifetime).

use crate::model::task::Task;
use crate::repo::snapshot_repo::SnapshotRepository;
use log::{debug, error};
use std::sync::mpsc::{channel, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Handle to the background persistence thread.
///
/// Dropping the handle closes the queue and joins the worker, so every
/// snapshot enqueued before teardown lands in storage.
pub(crate) struct WriteThrough {
    sender: Option<Sender<Vec<Task>>>,
    worker: Option<JoinHandle<()>>,
}

impl WriteThrough {
    /// Spawns the worker thread and hands it the repository.
    pub(crate) fn spawn(repo: Box<dyn SnapshotRepository + Send>) -> Self {
        let (sender, receiver) = channel::<Vec<Task>>();

        let worker = thread::spawn(move || {
            // The loop drains the queue in send order and exits once the
            // store drops its sender.
            for snapshot in receiver {
                let started_at = Instant::now();
                match repo.save(&snapshot) {
                    Ok(()) => debug!(
                        "event=snapshot_write module=store status=ok tasks={} duration_ms={}",
                        snapshot.len(),
                        started_at.elapsed().as_millis()
                    ),
                    Err(err) => error!(
                        "event=snapshot_write module=store status=error tasks={} duration_ms={} error={}",
                        snapshot.len(),
                        started_at.elapsed().as_millis(),
                        err
                    ),
                }
            }
        });

        Self {
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// Queues a snapshot for persistence. Fire-and-forget: returns
    /// immediately, before durability is confirmed.
    pub(crate) fn enqueue(&self, snapshot: Vec<Task>) {
        let Some(sender) = &self.sender else {
            return;
        };
        if sender.send(snapshot).is_err() {
            error!("event=snapshot_enqueue module=store status=error error_code=worker_gone");
        }
    }
}

impl Drop for WriteThrough {
    fn drop(&mut self) {
        // Closing the channel lets the worker finish the remaining queue.
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("event=write_through_join module=store status=error");
            }
        }
    }
}
