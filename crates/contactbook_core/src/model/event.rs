//! Calendar event record.

use crate::model::fields::{Address, EventDate, Name};
use crate::model::unique_list::UniqueKey;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type EventId = Uuid;

/// Named event on one calendar day.
///
/// Two events are duplicates when name and date both match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: Name,
    pub date: EventDate,
    pub address: Address,
}

impl Event {
    pub fn new(name: Name, date: EventDate, address: Address) -> Self {
        Self::with_id(Uuid::new_v4(), name, date, address)
    }

    pub fn with_id(id: EventId, name: Name, date: EventDate, address: Address) -> Self {
        Self {
            id,
            name,
            date,
            address,
        }
    }
}

impl UniqueKey for Event {
    fn same_identity(&self, other: &Self) -> bool {
        self.name == other.name && self.date == other.date
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} Date: {} Address: {}",
            self.name, self.date, self.address
        )
    }
}
