//! Task state container and its durability pipeline.
//!
//! # Responsibility
//! - Own the in-memory task collection and all mutation entry points.
//! - Keep the UI/CLI layers decoupled from persistence details.
//!
//! # Invariants
//! - All mutations flow through `TaskStore`; nothing else touches the
//!   collection.
//! - Snapshot writes are issued in the exact order mutations were applied.

pub mod task_store;
mod write_through;
