//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted in the snapshot slot.
//! - Provide text normalization shared by all write paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `text` is trimmed and non-empty for every constructed task.
//! - Wire field names stay camelCase so snapshots written by earlier
//!   releases of the app remain readable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Newtype over `Uuid` so signatures spell out which ids they carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generates a fresh id. Ids are never reused.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A single user-entered todo record.
///
/// Field order matches insertion into the snapshot wire shape
/// `{"tasks": [{"id", "text", "completed", "createdAt"}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable global ID, assigned at creation, immutable.
    pub id: TaskId,
    /// User-visible label. Trimmed, non-empty.
    pub text: String,
    /// Completion flag. Absent in older snapshots, so defaulted.
    #[serde(default)]
    pub completed: bool,
    /// Creation timestamp, immutable. Serialized as RFC 3339 text.
    #[serde(default = "unix_epoch")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a pending task with a generated id and the current time.
    ///
    /// Callers must pass already-normalized text; see [`normalize_text`].
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: TaskId::generate(),
            text: text.into(),
            completed: false,
            created_at: Utc::now(),
        }
    }
}

/// Derived counters over a task collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

/// Trims raw user input and rejects empty results.
///
/// Returns `None` for empty or whitespace-only input; mutations treat
/// that as a no-op rather than an error.
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn unix_epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}
