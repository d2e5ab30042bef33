//! Use-case layer.
//!
//! # Responsibility
//! - Run parsed commands against the session state.
//! - Keep persistence I/O outside command execution.

pub mod logic;
pub mod session;
pub mod storage;
