//! Domain model for the todo task list.
//!
//! # Responsibility
//! - Define the canonical task record and its snapshot wire shape.
//! - Keep input normalization rules in one place.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Task text is trimmed and non-empty on every write path.

pub mod task;
