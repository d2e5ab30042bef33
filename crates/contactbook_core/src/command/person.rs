//! Person commands: add, edit, delete, favourite, unfavourite, select.

use crate::bus::AppEvent;
use crate::command::{CommandError, CommandOutcome, CommandResult, UiAction};
use crate::model::fields::{
    Address, Birthday, Email, HomeNumber, Name, Phone, SchEmail, Tag, Website,
};
use crate::model::index::Index;
use crate::model::person::{Person, PersonDraft};
use crate::service::session::{PersonFilter, Session};
use std::collections::BTreeSet;

pub const ADD_USAGE: &str = "add: Adds a person to the address book. \
Parameters: n/NAME p/PHONE [h/HOME_NUMBER] e/EMAIL se/SCHOOL_EMAIL a/ADDRESS w/WEBSITE b/BIRTHDAY [t/TAG]...\n\
Example: add n/John Doe p/98765432 h/65551234 e/johnd@example.com se/johnd@u.nus.edu \
a/311, Clementi Ave 2, #02-25 w/johndoe.com b/01/01/1990 t/friends t/owesMoney";

pub const EDIT_USAGE: &str = "edit: Edits the details of the person identified by the index number \
used in the last person listing. Existing values will be overwritten by the input values.\n\
Parameters: INDEX (must be a positive integer) [n/NAME] [p/PHONE] [h/HOME_NUMBER] [e/EMAIL] \
[se/SCHOOL_EMAIL] [a/ADDRESS] [w/WEBSITE] [b/BIRTHDAY] [t/TAG]...\n\
Example: edit 1 p/91234567 e/johndoe@example.com";

pub const DELETE_USAGE: &str = "delete: Deletes the person identified by the index number used in \
the last person listing.\nParameters: INDEX (must be a positive integer)\nExample: delete 1";

pub const FAVOURITE_USAGE: &str = "fav: Adds the person identified by the index number used in the \
last person listing to your favourites.\nParameters: INDEX (must be a positive integer)\nExample: fav 1";

pub const UNFAVOURITE_USAGE: &str = "unfav: Removes the person identified by the index number used in \
the last person listing from your favourites.\nParameters: INDEX (must be a positive integer)\nExample: unfav 1";

pub const SELECT_USAGE: &str = "select: Selects the person identified by the index number used in the \
last person listing.\nParameters: INDEX (must be a positive integer)\nExample: select 1";

pub const MESSAGE_ADD_SUCCESS: &str = "New person added: ";
pub const MESSAGE_EDIT_SUCCESS: &str = "Edited Person: ";
pub const MESSAGE_DELETE_SUCCESS: &str = "Deleted Person: ";
pub const MESSAGE_FAVOURITE_SUCCESS: &str = "Added to favourites: ";
pub const MESSAGE_UNFAVOURITE_SUCCESS: &str = "Removed from favourites: ";
pub const MESSAGE_SELECT_SUCCESS: &str = "Selected Person: ";
pub const MESSAGE_NOT_EDITED: &str = "At least one field to edit must be provided.";

/// Field replacements for `edit`; `None` keeps the current value.
///
/// `tags: Some(empty)` clears every tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPersonDescriptor {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub home_number: Option<HomeNumber>,
    pub email: Option<Email>,
    pub sch_email: Option<SchEmail>,
    pub website: Option<Website>,
    pub address: Option<Address>,
    pub birthday: Option<Birthday>,
    pub tags: Option<BTreeSet<Tag>>,
}

impl EditPersonDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.home_number.is_some()
            || self.email.is_some()
            || self.sch_email.is_some()
            || self.website.is_some()
            || self.address.is_some()
            || self.birthday.is_some()
            || self.tags.is_some()
    }

    /// Overlays the edited fields onto `draft`.
    pub fn apply(&self, draft: PersonDraft) -> PersonDraft {
        PersonDraft {
            name: self.name.clone().unwrap_or(draft.name),
            phone: self.phone.clone().unwrap_or(draft.phone),
            home_number: self.home_number.clone().or(draft.home_number),
            email: self.email.clone().unwrap_or(draft.email),
            sch_email: self.sch_email.clone().unwrap_or(draft.sch_email),
            website: self.website.clone().unwrap_or(draft.website),
            address: self.address.clone().unwrap_or(draft.address),
            birthday: self.birthday.unwrap_or(draft.birthday),
            tags: self.tags.clone().unwrap_or(draft.tags),
        }
    }
}

pub(crate) fn add(session: &mut Session, draft: &PersonDraft) -> CommandOutcome {
    let person = Person::new(draft.clone());
    let feedback = format!("{MESSAGE_ADD_SUCCESS}{person}");
    session.store_mut().add_person(person)?;
    Ok(CommandResult::new(feedback))
}

pub(crate) fn edit(
    session: &mut Session,
    index: Index,
    changes: &EditPersonDescriptor,
) -> CommandOutcome {
    let (store_index, current) = session.resolve_person(index)?;
    let edited = current.with_fields(changes.apply(current.to_draft()));
    let feedback = format!("{MESSAGE_EDIT_SUCCESS}{edited}");
    session.store_mut().replace_person(store_index, edited)?;
    session.set_person_filter(PersonFilter::All);
    Ok(CommandResult::new(feedback))
}

pub(crate) fn delete(session: &mut Session, index: Index) -> CommandOutcome {
    let (store_index, _) = session.resolve_person(index)?;
    let removed = session.store_mut().remove_person(store_index)?;
    Ok(CommandResult::new(format!("{MESSAGE_DELETE_SUCCESS}{removed}")))
}

pub(crate) fn set_favourite(session: &mut Session, index: Index, favourite: bool) -> CommandOutcome {
    let (store_index, current) = session.resolve_person(index)?;
    match (current.favourite, favourite) {
        (true, true) => return Err(CommandError::AlreadyFavourite),
        (false, false) => return Err(CommandError::NotFavourite),
        _ => {}
    }

    let updated = current.with_favourite(favourite);
    let prefix = if favourite {
        MESSAGE_FAVOURITE_SUCCESS
    } else {
        MESSAGE_UNFAVOURITE_SUCCESS
    };
    let feedback = format!("{prefix}{updated}");
    session.store_mut().replace_person(store_index, updated)?;
    Ok(CommandResult::new(feedback))
}

pub(crate) fn select(session: &mut Session, index: Index) -> CommandOutcome {
    session.resolve_person(index)?;
    session
        .bus()
        .post(&AppEvent::JumpToPersonRequest { index });
    Ok(CommandResult::with_action(
        format!("{MESSAGE_SELECT_SUCCESS}{index}"),
        UiAction::SelectPerson(index),
    ))
}
