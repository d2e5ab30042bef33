//! SQLite-backed snapshot storage.
//!
//! # Responsibility
//! - Supply the initial `StoreSnapshot` at startup.
//! - Observe `StoreChanged` and write the full snapshot after a command
//!   completes.
//!
//! # Invariants
//! - Handlers only record the dirty revision; no I/O happens inside a
//!   dispatch.
//! - A flush writes every row in one transaction and clears the dirty mark
//!   only on success.

use crate::bus::{AppEvent, EventBus, EventCategory, EventFilter, SubscriptionId};
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::repo::record_store::{RecordStore, StoreSnapshot};
use crate::repo::snapshot_repo::{RepoError, SnapshotRepository, SqliteSnapshotRepository};
use log::{error, info};
use rusqlite::Connection;
use std::cell::Cell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::rc::Rc;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Repo(RepoError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "storage open failed: {err}"),
            Self::Repo(err) => write!(f, "storage access failed: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for StorageError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub struct SqliteSnapshotStorage {
    conn: Connection,
    dirty_revision: Rc<Cell<Option<u64>>>,
    subscription: Option<(EventBus, SubscriptionId)>,
}

impl SqliteSnapshotStorage {
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self::with_connection(open_db(path)?))
    }

    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self::with_connection(open_db_in_memory()?))
    }

    fn with_connection(conn: Connection) -> Self {
        Self {
            conn,
            dirty_revision: Rc::new(Cell::new(None)),
            subscription: None,
        }
    }

    /// Reads the persisted collections.
    pub fn load(&self) -> StorageResult<StoreSnapshot> {
        let snapshot = SqliteSnapshotRepository::new(&self.conn).load_snapshot()?;
        info!(
            "event=storage_load module=storage status=ok people={} events={}",
            snapshot.people.len(),
            snapshot.events.len()
        );
        Ok(snapshot)
    }

    /// Starts tracking store changes posted on `bus`. Replaces any earlier
    /// attachment.
    pub fn attach(&mut self, bus: &EventBus) {
        self.detach();
        let dirty = Rc::clone(&self.dirty_revision);
        let id = bus.subscribe(EventFilter::Category(EventCategory::Store), move |event| {
            if let AppEvent::StoreChanged(changed) = event {
                dirty.set(Some(changed.revision));
            }
            Ok(())
        });
        self.subscription = Some((bus.clone(), id));
    }

    pub fn detach(&mut self) {
        if let Some((bus, id)) = self.subscription.take() {
            bus.unsubscribe(id);
        }
    }

    /// Revision of the latest unsaved change, if any.
    pub fn dirty_revision(&self) -> Option<u64> {
        self.dirty_revision.get()
    }

    /// Writes `store` when a change arrived since the last flush.
    ///
    /// Returns whether anything was written.
    pub fn flush_if_dirty(&self, store: &RecordStore) -> StorageResult<bool> {
        let Some(revision) = self.dirty_revision.get() else {
            return Ok(false);
        };
        self.save(&store.snapshot(), revision)?;
        self.dirty_revision.set(None);
        Ok(true)
    }

    /// Unconditionally replaces the persisted collections.
    pub fn save_snapshot(&self, snapshot: &StoreSnapshot) -> StorageResult<()> {
        self.save(snapshot, 0)
    }

    fn save(&self, snapshot: &StoreSnapshot, revision: u64) -> StorageResult<()> {
        match SqliteSnapshotRepository::new(&self.conn).save_snapshot(snapshot) {
            Ok(()) => {
                info!(
                    "event=storage_flush module=storage status=ok revision={} people={} events={}",
                    revision,
                    snapshot.people.len(),
                    snapshot.events.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=storage_flush module=storage status=error revision={} error={}",
                    revision, err
                );
                Err(err.into())
            }
        }
    }
}

impl Drop for SqliteSnapshotStorage {
    fn drop(&mut self) {
        self.detach();
    }
}
