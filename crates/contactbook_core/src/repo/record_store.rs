//! In-memory record store for people and events.
//!
//! # Responsibility
//! - Own the canonical person and event collections.
//! - Enforce uniqueness before any mutation becomes visible.
//! - Publish exactly one `StoreChanged` per committed mutation.
//!
//! # Invariants
//! - Neither collection ever holds two entries with the same identity.
//! - `revision` increases by one per committed mutation and never otherwise.
//! - Observers are notified only after the mutation is fully applied; failed
//!   operations change nothing and publish nothing.

use crate::bus::{AppEvent, EventBus, RecordChange, StoreChanged};
use crate::model::event::Event;
use crate::model::index::Index;
use crate::model::person::Person;
use crate::model::unique_list::{UniqueList, UniqueListError};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Collection a store operation targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Person,
    Event,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Event => "event",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An entry with the same identity already exists.
    DuplicateEntity(RecordKind),
    /// Index does not address an existing entry.
    IndexOutOfRange {
        kind: RecordKind,
        index: Index,
        len: usize,
    },
}

impl StoreError {
    fn from_list(kind: RecordKind, err: UniqueListError) -> Self {
        match err {
            UniqueListError::Duplicate => Self::DuplicateEntity(kind),
            UniqueListError::IndexOutOfRange { index, len } => {
                Self::IndexOutOfRange { kind, index, len }
            }
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEntity(kind) => write!(f, "duplicate {} entry", kind.as_str()),
            Self::IndexOutOfRange { kind, index, len } => write!(
                f,
                "{} index {index} is out of range for {len} entries",
                kind.as_str()
            ),
        }
    }
}

impl Error for StoreError {}

/// Owned copy of both collections, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub people: Vec<Person>,
    pub events: Vec<Event>,
}

pub struct RecordStore {
    people: UniqueList<Person>,
    events: UniqueList<Event>,
    revision: u64,
    bus: EventBus,
}

impl RecordStore {
    /// Creates an empty store publishing on `bus`.
    pub fn new(bus: EventBus) -> Self {
        Self {
            people: UniqueList::new(),
            events: UniqueList::new(),
            revision: 0,
            bus,
        }
    }

    /// Creates a store seeded from persisted data. Publishes nothing.
    pub fn from_snapshot(bus: EventBus, snapshot: StoreSnapshot) -> StoreResult<Self> {
        let (people, events) = build_lists(snapshot)?;
        info!(
            "event=store_load module=store status=ok people={} events={}",
            people.len(),
            events.len()
        );
        Ok(Self {
            people,
            events,
            revision: 0,
            bus,
        })
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn people(&self) -> &[Person] {
        self.people.as_slice()
    }

    pub fn person(&self, index: Index) -> Option<&Person> {
        self.people.get(index)
    }

    pub fn events(&self) -> &[Event] {
        self.events.as_slice()
    }

    pub fn event(&self, index: Index) -> Option<&Event> {
        self.events.get(index)
    }

    pub fn add_person(&mut self, person: Person) -> StoreResult<()> {
        self.people
            .add(person.clone())
            .map_err(|err| StoreError::from_list(RecordKind::Person, err))?;
        self.commit(RecordChange::PersonAdded(person));
        Ok(())
    }

    pub fn remove_person(&mut self, index: Index) -> StoreResult<Person> {
        let removed = self
            .people
            .remove(index)
            .map_err(|err| StoreError::from_list(RecordKind::Person, err))?;
        self.commit(RecordChange::PersonRemoved(removed.clone()));
        Ok(removed)
    }

    /// Swaps the person at `index` and returns the previous value.
    pub fn replace_person(&mut self, index: Index, person: Person) -> StoreResult<Person> {
        let before = self
            .people
            .replace(index, person.clone())
            .map_err(|err| StoreError::from_list(RecordKind::Person, err))?;
        self.commit(RecordChange::PersonReplaced {
            before: before.clone(),
            after: person,
        });
        Ok(before)
    }

    pub fn add_event(&mut self, event: Event) -> StoreResult<()> {
        self.events
            .add(event.clone())
            .map_err(|err| StoreError::from_list(RecordKind::Event, err))?;
        self.commit(RecordChange::EventAdded(event));
        Ok(())
    }

    pub fn remove_event(&mut self, index: Index) -> StoreResult<Event> {
        let removed = self
            .events
            .remove(index)
            .map_err(|err| StoreError::from_list(RecordKind::Event, err))?;
        self.commit(RecordChange::EventRemoved(removed.clone()));
        Ok(removed)
    }

    /// Swaps the event at `index` and returns the previous value.
    pub fn replace_event(&mut self, index: Index, event: Event) -> StoreResult<Event> {
        let before = self
            .events
            .replace(index, event.clone())
            .map_err(|err| StoreError::from_list(RecordKind::Event, err))?;
        self.commit(RecordChange::EventReplaced {
            before: before.clone(),
            after: event,
        });
        Ok(before)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            people: self.people.as_slice().to_vec(),
            events: self.events.as_slice().to_vec(),
        }
    }

    /// Replaces both collections with `snapshot` as one mutation.
    pub fn reset(&mut self, snapshot: StoreSnapshot) -> StoreResult<()> {
        let (people, events) = build_lists(snapshot)?;
        self.people = people;
        self.events = events;
        self.commit(RecordChange::Reset {
            people: self.people.len(),
            events: self.events.len(),
        });
        Ok(())
    }

    fn commit(&mut self, change: RecordChange) {
        self.revision += 1;
        debug!(
            "event=store_commit module=store status=ok change={} revision={} people={} events={}",
            change.as_str(),
            self.revision,
            self.people.len(),
            self.events.len()
        );
        self.bus.post(&AppEvent::StoreChanged(StoreChanged {
            revision: self.revision,
            change,
        }));
    }
}

fn build_lists(snapshot: StoreSnapshot) -> StoreResult<(UniqueList<Person>, UniqueList<Event>)> {
    let people = UniqueList::from_vec(snapshot.people)
        .map_err(|err| StoreError::from_list(RecordKind::Person, err))?;
    let events = UniqueList::from_vec(snapshot.events)
        .map_err(|err| StoreError::from_list(RecordKind::Event, err))?;
    Ok((people, events))
}
