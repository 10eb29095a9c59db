//! Snapshot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the full task collection as one serialized slot value.
//! - Keep SQL and JSON details inside the core persistence boundary.
//!
//! # Invariants
//! - The slot name is fixed; every save overwrites the prior value.
//! - `load` never fails on bad slot *content*: corruption is logged and
//!   degraded to an empty collection. Transport errors still surface so
//!   callers can decide how to degrade.

use crate::db::DbError;
use crate::model::task::Task;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed slot name for the persisted task list.
///
/// Matches the storage name the mobile app has always used, so existing
/// on-device data stays readable.
pub const SNAPSHOT_SLOT: &str = "todo-storage";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize snapshot: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable storage contract for the task collection.
///
/// The state container writes through this trait after every applied
/// mutation and reads through it exactly once at startup.
pub trait SnapshotRepository {
    /// Serializes the collection and overwrites the slot value.
    fn save(&self, tasks: &[Task]) -> RepoResult<()>;

    /// Loads the persisted collection.
    ///
    /// Returns an empty collection when the slot is absent or when its
    /// content cannot be parsed into well-formed tasks.
    fn load(&self) -> RepoResult<Vec<Task>>;
}

/// Wire envelope for the slot value: `{"tasks": [...]}`.
#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Debug, Serialize)]
struct SnapshotRef<'a> {
    tasks: &'a [Task],
}

/// SQLite-backed snapshot repository.
///
/// The slot lives in the `snapshots` key/value table; this mirrors how
/// the mobile platform's key/value storage is itself backed by SQLite.
pub struct SqliteSnapshotRepository {
    conn: Connection,
}

impl SqliteSnapshotRepository {
    /// Wraps a bootstrapped connection (see [`crate::db::open_db`]).
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository {
    fn save(&self, tasks: &[Task]) -> RepoResult<()> {
        let value = serde_json::to_string(&SnapshotRef { tasks }).map_err(RepoError::Serialize)?;

        self.conn.execute(
            "INSERT INTO snapshots (name, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(name) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![SNAPSHOT_SLOT, value],
        )?;

        Ok(())
    }

    fn load(&self) -> RepoResult<Vec<Task>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM snapshots WHERE name = ?1;",
                [SNAPSHOT_SLOT],
                |row| row.get(0),
            )
            .optional()?;

        let Some(value) = value else {
            debug!("event=snapshot_load module=repo status=ok slot={SNAPSHOT_SLOT} outcome=absent");
            return Ok(Vec::new());
        };

        match parse_snapshot(&value) {
            Ok(tasks) => {
                debug!(
                    "event=snapshot_load module=repo status=ok slot={SNAPSHOT_SLOT} tasks={}",
                    tasks.len()
                );
                Ok(tasks)
            }
            Err(reason) => {
                // Deliberately distinct from the absent case so silent data
                // loss is at least observable in the logs.
                warn!(
                    "event=snapshot_corrupt module=repo status=degraded slot={SNAPSHOT_SLOT} reason={reason}"
                );
                Ok(Vec::new())
            }
        }
    }
}

fn parse_snapshot(value: &str) -> Result<Vec<Task>, String> {
    let snapshot: Snapshot =
        serde_json::from_str(value).map_err(|err| format!("unparseable slot value: {err}"))?;

    let mut seen = HashSet::with_capacity(snapshot.tasks.len());
    for task in &snapshot.tasks {
        if task.text.trim().is_empty() {
            return Err(format!("task {} has empty text", task.id));
        }
        if !seen.insert(task.id) {
            return Err(format!("duplicate task id {}", task.id));
        }
    }

    Ok(snapshot.tasks)
}
