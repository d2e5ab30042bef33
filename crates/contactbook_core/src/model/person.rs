//! Person (contact) record.
//!
//! # Responsibility
//! - Define the canonical contact shape held by the record store.
//! - Provide copy-on-write helpers used by edit/favourite commands.
//!
//! # Invariants
//! - `id` is stable across edits and never reused.
//! - Duplicate detection uses name (case-insensitive) + phone + email only.
//! - A `Person` is never mutated while stored; edits build a new value.

use crate::model::fields::{
    Address, Birthday, Email, HomeNumber, Name, Phone, SchEmail, Tag, Website,
};
use crate::model::unique_list::UniqueKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a stored contact.
pub type PersonId = Uuid;

/// Validated field values for a new person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDraft {
    pub name: Name,
    pub phone: Phone,
    pub home_number: Option<HomeNumber>,
    pub email: Email,
    pub sch_email: SchEmail,
    pub website: Website,
    pub address: Address,
    pub birthday: Birthday,
    pub tags: BTreeSet<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: Name,
    pub phone: Phone,
    pub home_number: Option<HomeNumber>,
    pub email: Email,
    pub sch_email: SchEmail,
    pub website: Website,
    pub address: Address,
    pub birthday: Birthday,
    pub tags: BTreeSet<Tag>,
    pub favourite: bool,
}

impl Person {
    /// Creates a non-favourite person with a generated id.
    pub fn new(draft: PersonDraft) -> Self {
        Self::with_id(Uuid::new_v4(), draft)
    }

    /// Creates a person with a caller-provided id (snapshot load path).
    pub fn with_id(id: PersonId, draft: PersonDraft) -> Self {
        Self {
            id,
            name: draft.name,
            phone: draft.phone,
            home_number: draft.home_number,
            email: draft.email,
            sch_email: draft.sch_email,
            website: draft.website,
            address: draft.address,
            birthday: draft.birthday,
            tags: draft.tags,
            favourite: false,
        }
    }

    /// Returns a copy with the favourite flag set to `favourite`.
    pub fn with_favourite(&self, favourite: bool) -> Self {
        Self {
            favourite,
            ..self.clone()
        }
    }

    /// Returns the editable fields as a draft, for copy-on-write edits.
    pub fn to_draft(&self) -> PersonDraft {
        PersonDraft {
            name: self.name.clone(),
            phone: self.phone.clone(),
            home_number: self.home_number.clone(),
            email: self.email.clone(),
            sch_email: self.sch_email.clone(),
            website: self.website.clone(),
            address: self.address.clone(),
            birthday: self.birthday,
            tags: self.tags.clone(),
        }
    }

    /// Returns a copy carrying `draft` fields but this person's id and flags.
    pub fn with_fields(&self, draft: PersonDraft) -> Self {
        Self {
            favourite: self.favourite,
            ..Self::with_id(self.id, draft)
        }
    }
}

impl UniqueKey for Person {
    fn same_identity(&self, other: &Self) -> bool {
        self.name.folded() == other.name.folded()
            && self.phone == other.phone
            && self.email == other.email
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Phone: {}", self.name, self.phone)?;
        if let Some(home_number) = &self.home_number {
            write!(f, " Home: {home_number}")?;
        }
        write!(
            f,
            " Email: {} School Email: {} Website: {} Address: {} Birthday: {} Tags: ",
            self.email, self.sch_email, self.website, self.address, self.birthday
        )?;
        for tag in &self.tags {
            write!(f, "[{tag}]")?;
        }
        Ok(())
    }
}
