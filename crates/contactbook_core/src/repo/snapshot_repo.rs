//! Snapshot persistence contract and SQLite implementation.
//!
//! # Responsibility
//! - Load the full person/event collections at startup.
//! - Replace the persisted collections with a new snapshot atomically.
//!
//! # Invariants
//! - `save_snapshot` either writes every row or none.
//! - Read paths re-validate each stored field and reject invalid state
//!   instead of masking it.
//! - Row order follows the `position` column, which mirrors display order.

use crate::db::DbError;
use crate::model::event::Event;
use crate::model::fields::{
    Address, Birthday, Email, EventDate, HomeNumber, Name, Phone, SchEmail, Tag, ValidationError,
    Website,
};
use crate::model::person::{Person, PersonDraft};
use crate::repo::record_store::StoreSnapshot;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::collections::{BTreeSet, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A stored row no longer passes validation.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Whole-collection persistence for the record store.
pub trait SnapshotRepository {
    fn load_snapshot(&self) -> RepoResult<StoreSnapshot>;
    fn save_snapshot(&self, snapshot: &StoreSnapshot) -> RepoResult<()>;
}

pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load_snapshot(&self) -> RepoResult<StoreSnapshot> {
        let mut tags = load_tags(self.conn)?;

        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, phone, home_number, email, sch_email, website, address,
                    birthday, favourite
             FROM people
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut people = Vec::new();
        while let Some(row) = rows.next()? {
            let id = parse_uuid(row, "people")?;
            let person_tags = tags.remove(&id).unwrap_or_default();
            people.push(parse_person_row(row, id, person_tags)?);
        }

        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, date, address
             FROM events
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }

        Ok(StoreSnapshot { people, events })
    }

    fn save_snapshot(&self, snapshot: &StoreSnapshot) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute_batch("DELETE FROM person_tags; DELETE FROM people; DELETE FROM events;")?;
        write_people(&tx, &snapshot.people)?;
        write_events(&tx, &snapshot.events)?;
        tx.commit()?;
        Ok(())
    }
}

fn write_people(tx: &Transaction<'_>, people: &[Person]) -> RepoResult<()> {
    let mut insert_person = tx.prepare(
        "INSERT INTO people (
            uuid, position, name, phone, home_number, email, sch_email, website,
            address, birthday, favourite
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
    )?;
    let mut insert_tag =
        tx.prepare("INSERT INTO person_tags (person_uuid, tag) VALUES (?1, ?2);")?;

    for (position, person) in people.iter().enumerate() {
        let uuid = person.id.to_string();
        insert_person.execute(params![
            uuid,
            position as i64,
            person.name.as_str(),
            person.phone.as_str(),
            person.home_number.as_ref().map(HomeNumber::as_str),
            person.email.as_str(),
            person.sch_email.as_str(),
            person.website.as_str(),
            person.address.as_str(),
            person.birthday.to_string(),
            i64::from(person.favourite),
        ])?;
        for tag in &person.tags {
            insert_tag.execute(params![uuid, tag.as_str()])?;
        }
    }
    Ok(())
}

fn write_events(tx: &Transaction<'_>, events: &[Event]) -> RepoResult<()> {
    let mut insert_event = tx.prepare(
        "INSERT INTO events (uuid, position, name, date, address)
         VALUES (?1, ?2, ?3, ?4, ?5);",
    )?;
    for (position, event) in events.iter().enumerate() {
        insert_event.execute(params![
            event.id.to_string(),
            position as i64,
            event.name.as_str(),
            event.date.to_string(),
            event.address.as_str(),
        ])?;
    }
    Ok(())
}

fn load_tags(conn: &Connection) -> RepoResult<HashMap<Uuid, BTreeSet<Tag>>> {
    let mut stmt = conn.prepare("SELECT person_uuid, tag FROM person_tags;")?;
    let mut rows = stmt.query([])?;
    let mut tags: HashMap<Uuid, BTreeSet<Tag>> = HashMap::new();
    while let Some(row) = rows.next()? {
        let owner_text: String = row.get("person_uuid")?;
        let owner = Uuid::parse_str(&owner_text).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid uuid value `{owner_text}` in person_tags.person_uuid"
            ))
        })?;
        let raw: String = row.get("tag")?;
        let tag = stored(Tag::parse(&raw), "person_tags.tag")?;
        tags.entry(owner).or_default().insert(tag);
    }
    Ok(tags)
}

fn parse_person_row(row: &Row<'_>, id: Uuid, tags: BTreeSet<Tag>) -> RepoResult<Person> {
    let text = |column: &str| -> RepoResult<String> { Ok(row.get::<_, String>(column)?) };

    let home_number = match row.get::<_, Option<String>>("home_number")? {
        Some(value) => Some(stored(HomeNumber::parse(&value), "people.home_number")?),
        None => None,
    };
    let favourite = match row.get::<_, i64>("favourite")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid favourite value `{other}` in people.favourite"
            )));
        }
    };

    let draft = PersonDraft {
        name: stored(Name::parse(&text("name")?), "people.name")?,
        phone: stored(Phone::parse(&text("phone")?), "people.phone")?,
        home_number,
        email: stored(Email::parse(&text("email")?), "people.email")?,
        sch_email: stored(SchEmail::parse(&text("sch_email")?), "people.sch_email")?,
        website: stored(Website::parse(&text("website")?), "people.website")?,
        address: stored(Address::parse(&text("address")?), "people.address")?,
        birthday: stored(Birthday::parse(&text("birthday")?), "people.birthday")?,
        tags,
    };
    Ok(Person::with_id(id, draft).with_favourite(favourite))
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<Event> {
    let id = parse_uuid(row, "events")?;
    let name: String = row.get("name")?;
    let date: String = row.get("date")?;
    let address: String = row.get("address")?;
    Ok(Event::with_id(
        id,
        stored(Name::parse(&name), "events.name")?,
        stored(EventDate::parse(&date), "events.date")?,
        stored(Address::parse(&address), "events.address")?,
    ))
}

fn parse_uuid(row: &Row<'_>, table: &str) -> RepoResult<Uuid> {
    let uuid_text: String = row.get("uuid")?;
    Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in {table}.uuid"))
    })
}

fn stored<T>(value: Result<T, ValidationError>, column: &str) -> RepoResult<T> {
    value.map_err(|err| {
        RepoError::InvalidData(format!("{column} violates {} constraint", err.field.as_str()))
    })
}
