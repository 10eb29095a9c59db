//! Core state and persistence logic for the minitodo app.
//! This crate is the single source of truth for task-list invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{normalize_text, Task, TaskId, TaskStats};
pub use repo::snapshot_repo::{
    RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository, SNAPSHOT_SLOT,
};
pub use store::task_store::TaskStore;
