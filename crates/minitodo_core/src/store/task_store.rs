//! Task state container.
//!
//! # Responsibility
//! - Act as the sole authority over the in-memory task collection.
//! - Seed state from the snapshot slot at startup and write every applied
//!   mutation back through the persistence worker.
//!
//! # Invariants
//! - Collection order is insertion order; toggle and edit never reorder.
//! - Task ids are unique within the collection and never reused.
//! - Invalid calls (empty text, unknown id) are absorbed as silent no-ops:
//!   the presentation layer is expected to prevent them, so the store
//!   neither panics nor returns errors for them.

use crate::model::task::{normalize_text, Task, TaskId, TaskStats};
use crate::repo::snapshot_repo::SnapshotRepository;
use crate::store::write_through::WriteThrough;
use log::{debug, info, warn};

/// In-memory source of truth for the task collection.
///
/// Constructed explicitly and passed by reference to presentation code;
/// deliberately not a process-wide singleton so initialization and
/// teardown stay testable in isolation.
pub struct TaskStore {
    tasks: Vec<Task>,
    writer: WriteThrough,
}

impl TaskStore {
    /// Opens the store: reads the persisted snapshot once to seed initial
    /// state, then hands the repository to the write-through worker.
    ///
    /// Any load failure degrades to an empty collection; startup is never
    /// fatal on account of storage.
    pub fn open(repo: Box<dyn SnapshotRepository + Send>) -> Self {
        let tasks = match repo.load() {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(
                    "event=store_seed module=store status=degraded error={err} fallback=empty"
                );
                Vec::new()
            }
        };
        info!(
            "event=store_open module=store status=ok tasks={}",
            tasks.len()
        );

        Self {
            tasks,
            writer: WriteThrough::spawn(repo),
        }
    }

    /// Appends a new pending task built from `raw_text`.
    ///
    /// The text is trimmed first; empty or whitespace-only input is a
    /// no-op (no task created, no write-through scheduled).
    pub fn add(&mut self, raw_text: &str) {
        let Some(text) = normalize_text(raw_text) else {
            debug!("event=task_add module=store status=skipped reason=empty_text");
            return;
        };

        let task = Task::new(text);
        debug!("event=task_add module=store status=ok id={}", task.id);
        self.tasks.push(task);
        self.schedule_write();
    }

    /// Removes the task with `id`. Unknown ids are a no-op.
    pub fn delete(&mut self, id: TaskId) {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);

        if self.tasks.len() == before {
            debug!("event=task_delete module=store status=skipped reason=unknown_id id={id}");
            return;
        }
        debug!("event=task_delete module=store status=ok id={id}");
        self.schedule_write();
    }

    /// Flips the completion flag on the task with `id`. Unknown ids are a
    /// no-op.
    pub fn toggle(&mut self, id: TaskId) {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_toggle module=store status=skipped reason=unknown_id id={id}");
            return;
        };

        task.completed = !task.completed;
        debug!(
            "event=task_toggle module=store status=ok id={id} completed={}",
            task.completed
        );
        self.schedule_write();
    }

    /// Replaces the text of the task with `id`.
    ///
    /// The new text is trimmed first; an empty result is a validation
    /// rejection that preserves the existing text. Unknown ids are a
    /// no-op.
    pub fn edit(&mut self, id: TaskId, new_text: &str) {
        let Some(text) = normalize_text(new_text) else {
            debug!("event=task_edit module=store status=skipped reason=empty_text id={id}");
            return;
        };
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_edit module=store status=skipped reason=unknown_id id={id}");
            return;
        };

        task.text = text;
        debug!("event=task_edit module=store status=ok id={id}");
        self.schedule_write();
    }

    /// Removes every completed task, preserving the relative order of the
    /// remainder. Calling it again immediately is a no-op.
    pub fn clear_completed(&mut self) {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);

        let removed = before - self.tasks.len();
        if removed == 0 {
            debug!("event=task_clear module=store status=skipped reason=nothing_completed");
            return;
        }
        debug!("event=task_clear module=store status=ok removed={removed}");
        self.schedule_write();
    }

    /// Derived counters. Pure read, no side effects.
    pub fn stats(&self) -> TaskStats {
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        TaskStats {
            total: self.tasks.len(),
            completed,
            pending: self.tasks.len() - completed,
        }
    }

    /// Read-only view of the collection, in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Flushes the write-through queue and joins the worker.
    ///
    /// Mutations never block on durability; this is the one call that
    /// does, so tests and CLI exits can observe the final snapshot.
    pub fn close(self) {
        info!("event=store_close module=store status=ok tasks={}", self.tasks.len());
    }

    fn schedule_write(&self) {
        self.writer.enqueue(self.tasks.clone());
    }
}
