//! Core logic for the contact book: validated records, the command set,
//! the input parser and the event bus connecting them to observers.

pub mod bus;
pub mod command;
pub mod db;
pub mod logging;
pub mod model;
pub mod parser;
pub mod repo;
pub mod service;

pub use bus::{AppEvent, EventBus, EventCategory, EventFilter, EventKind, SubscriptionId};
pub use command::{Command, CommandError, CommandResult, CommandWord, UiAction};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::event::Event;
pub use model::fields::ValidationError;
pub use model::index::Index;
pub use model::person::Person;
pub use parser::{parse_command, ParseError};
pub use repo::record_store::{RecordStore, StoreError, StoreSnapshot};
pub use service::logic::{Logic, LogicError};
pub use service::session::{Session, DEFAULT_THEMES};
pub use service::storage::{SqliteSnapshotStorage, StorageError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
