//! Persistence adapters for the task snapshot.
//!
//! # Responsibility
//! - Define the durable snapshot contract used by the state container.
//! - Isolate SQLite and serialization details from store orchestration.
//!
//! # Invariants
//! - A snapshot write fully replaces the previous slot value.
//! - Absent or unreadable slot data degrades to an empty collection and
//!   never propagates as a fatal error to callers.

pub mod snapshot_repo;
