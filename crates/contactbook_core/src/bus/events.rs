//! Events carried by the in-process bus.

use crate::model::event::Event;
use crate::model::fields::EventDate;
use crate::model::index::Index;
use crate::model::person::Person;

/// Coarse event grouping used by category filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    /// Record store mutations.
    Store,
    /// Requests aimed at the presentation layer.
    Ui,
}

/// Exact event discriminant used by kind filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    StoreChanged,
    ThemeSwitchRequest,
    JumpToPersonRequest,
    ShowHelpRequest,
    ExitAppRequest,
    CalendarDateSelected,
}

impl EventKind {
    pub fn category(self) -> EventCategory {
        match self {
            Self::StoreChanged => EventCategory::Store,
            Self::ThemeSwitchRequest
            | Self::JumpToPersonRequest
            | Self::ShowHelpRequest
            | Self::ExitAppRequest
            | Self::CalendarDateSelected => EventCategory::Ui,
        }
    }

    /// Stable name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StoreChanged => "store_changed",
            Self::ThemeSwitchRequest => "theme_switch_request",
            Self::JumpToPersonRequest => "jump_to_person_request",
            Self::ShowHelpRequest => "show_help_request",
            Self::ExitAppRequest => "exit_app_request",
            Self::CalendarDateSelected => "calendar_date_selected",
        }
    }
}

/// What a single record store mutation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordChange {
    PersonAdded(Person),
    PersonRemoved(Person),
    PersonReplaced { before: Person, after: Person },
    EventAdded(Event),
    EventRemoved(Event),
    EventReplaced { before: Event, after: Event },
    /// Both collections were swapped wholesale (clear, undo, redo).
    Reset { people: usize, events: usize },
}

impl RecordChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PersonAdded(_) => "person_added",
            Self::PersonRemoved(_) => "person_removed",
            Self::PersonReplaced { .. } => "person_replaced",
            Self::EventAdded(_) => "event_added",
            Self::EventRemoved(_) => "event_removed",
            Self::EventReplaced { .. } => "event_replaced",
            Self::Reset { .. } => "reset",
        }
    }
}

/// Notification that the record store committed one mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChanged {
    /// Store revision after the mutation.
    pub revision: u64,
    pub change: RecordChange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    StoreChanged(StoreChanged),
    ThemeSwitchRequest { theme: String },
    JumpToPersonRequest { index: Index },
    ShowHelpRequest,
    ExitAppRequest,
    /// A day was picked in the calendar panel; posted by front-ends.
    CalendarDateSelected { date: EventDate },
}

impl AppEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::StoreChanged(_) => EventKind::StoreChanged,
            Self::ThemeSwitchRequest { .. } => EventKind::ThemeSwitchRequest,
            Self::JumpToPersonRequest { .. } => EventKind::JumpToPersonRequest,
            Self::ShowHelpRequest => EventKind::ShowHelpRequest,
            Self::ExitAppRequest => EventKind::ExitAppRequest,
            Self::CalendarDateSelected { .. } => EventKind::CalendarDateSelected,
        }
    }

    pub fn category(&self) -> EventCategory {
        self.kind().category()
    }
}
