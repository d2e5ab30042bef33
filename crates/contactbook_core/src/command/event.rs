//! Calendar event commands: addevent, deleteevent, editevent.

use crate::command::{CommandOutcome, CommandResult};
use crate::model::event::Event;
use crate::model::fields::{Address, EventDate, Name};
use crate::model::index::Index;
use crate::service::session::Session;

pub const ADD_EVENT_USAGE: &str = "addevent: Adds an event to the calendar. \
Parameters: n/NAME d/DATE a/ADDRESS\nExample: addevent n/ZoukOut d/12/12/2018 a/Sentosa, Siloso Beach";

pub const DELETE_EVENT_USAGE: &str = "deleteevent: Deletes the event identified by the index number \
in the event listing.\nParameters: INDEX (must be a positive integer)\nExample: deleteevent 1";

pub const EDIT_EVENT_USAGE: &str = "editevent: Edits the event identified by the index number in the \
event listing. Existing values will be overwritten by the input values.\n\
Parameters: INDEX (must be a positive integer) [n/NAME] [d/DATE] [a/ADDRESS]\n\
Example: editevent 1 d/13/12/2018";

pub const MESSAGE_ADD_EVENT_SUCCESS: &str = "New event added: ";
pub const MESSAGE_DELETE_EVENT_SUCCESS: &str = "Deleted Event: ";
pub const MESSAGE_EDIT_EVENT_SUCCESS: &str = "Edited Event: ";

/// Validated fields for a new event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub name: Name,
    pub date: EventDate,
    pub address: Address,
}

/// Field replacements for `editevent`; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditEventDescriptor {
    pub name: Option<Name>,
    pub date: Option<EventDate>,
    pub address: Option<Address>,
}

impl EditEventDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some() || self.date.is_some() || self.address.is_some()
    }

    /// Builds the edited copy of `event`, keeping its id.
    pub fn apply(&self, event: &Event) -> Event {
        Event::with_id(
            event.id,
            self.name.clone().unwrap_or_else(|| event.name.clone()),
            self.date.unwrap_or(event.date),
            self.address.clone().unwrap_or_else(|| event.address.clone()),
        )
    }
}

pub(crate) fn add(session: &mut Session, draft: &EventDraft) -> CommandOutcome {
    let event = Event::new(
        draft.name.clone(),
        draft.date,
        draft.address.clone(),
    );
    let feedback = format!("{MESSAGE_ADD_EVENT_SUCCESS}{event}");
    session.store_mut().add_event(event)?;
    Ok(CommandResult::new(feedback))
}

pub(crate) fn delete(session: &mut Session, index: Index) -> CommandOutcome {
    let (store_index, _) = session.resolve_event(index)?;
    let removed = session.store_mut().remove_event(store_index)?;
    Ok(CommandResult::new(format!(
        "{MESSAGE_DELETE_EVENT_SUCCESS}{removed}"
    )))
}

pub(crate) fn edit(
    session: &mut Session,
    index: Index,
    changes: &EditEventDescriptor,
) -> CommandOutcome {
    let (store_index, current) = session.resolve_event(index)?;
    let edited = changes.apply(&current);
    let feedback = format!("{MESSAGE_EDIT_EVENT_SUCCESS}{edited}");
    session.store_mut().replace_event(store_index, edited)?;
    Ok(CommandResult::new(feedback))
}
