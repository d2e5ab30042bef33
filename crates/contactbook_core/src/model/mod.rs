//! Domain model for contacts and calendar events.
//!
//! # Responsibility
//! - Define validated field values, records, and the uniqueness-checked
//!   collection the record store is built on.
//!
//! # Invariants
//! - Every field value inside a record passed its validator.
//! - Records are replaced, never edited in place, once stored.

pub mod event;
pub mod fields;
pub mod index;
pub mod person;
pub mod unique_list;
