//! Record collections and their persistence contracts.
//!
//! # Responsibility
//! - Hold the canonical in-memory collections (`record_store`).
//! - Isolate SQLite row mapping from the rest of the core (`snapshot_repo`).
//!
//! # Invariants
//! - Snapshot reads re-validate every field and never return invalid values.

pub mod record_store;
pub mod snapshot_repo;
