//! Command execution context.
//!
//! # Responsibility
//! - Own the record store together with the state commands resolve against:
//!   the displayed person view, the theme list, undo/redo checkpoints and the
//!   input history.
//! - Run commands to completion, one at a time.
//!
//! # Invariants
//! - Person indices are resolved against the displayed (filtered) view.
//! - Undo checkpoints are pushed only after an undoable command succeeded.
//! - A new undoable command clears the redo stack.
//! - At most `MAX_UNDO_DEPTH` checkpoints and `MAX_HISTORY_LEN` lines are
//!   kept; the oldest are dropped first.

use crate::bus::EventBus;
use crate::command::{Command, CommandError, CommandOutcome};
use crate::model::event::Event;
use crate::model::index::Index;
use crate::model::person::Person;
use crate::repo::record_store::{RecordStore, StoreSnapshot};
use log::{debug, info, warn};

/// Theme names offered when the front-end supplies none.
pub const DEFAULT_THEMES: &[&str] = &["DarkTheme", "BrightTheme"];

pub const MAX_UNDO_DEPTH: usize = 100;
pub const MAX_HISTORY_LEN: usize = 1000;

/// Predicate selecting which people are displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PersonFilter {
    #[default]
    All,
    /// Matches people whose name contains any keyword as a whole word,
    /// ignoring case.
    NameKeywords(Vec<String>),
}

impl PersonFilter {
    pub fn matches(&self, person: &Person) -> bool {
        match self {
            Self::All => true,
            Self::NameKeywords(keywords) => {
                let folded = person.name.folded();
                folded.split_whitespace().any(|word| {
                    keywords
                        .iter()
                        .any(|keyword| keyword.to_lowercase() == word)
                })
            }
        }
    }
}

pub struct Session {
    store: RecordStore,
    bus: EventBus,
    themes: Vec<String>,
    person_filter: PersonFilter,
    undo_stack: Vec<StoreSnapshot>,
    redo_stack: Vec<StoreSnapshot>,
    history: Vec<String>,
}

impl Session {
    /// Composes a session; `store` is expected to publish on `bus`.
    pub fn new(store: RecordStore, bus: EventBus, themes: Vec<String>) -> Self {
        Self {
            store,
            bus,
            themes,
            person_filter: PersonFilter::All,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn themes(&self) -> &[String] {
        &self.themes
    }

    pub fn person_filter(&self) -> &PersonFilter {
        &self.person_filter
    }

    pub(crate) fn set_person_filter(&mut self, filter: PersonFilter) {
        self.person_filter = filter;
    }

    /// People currently shown to the user, in display order.
    pub fn displayed_people(&self) -> Vec<&Person> {
        self.store
            .people()
            .iter()
            .filter(|person| self.person_filter.matches(person))
            .collect()
    }

    /// Events currently shown to the user; the event view is unfiltered.
    pub fn displayed_events(&self) -> &[Event] {
        self.store.events()
    }

    /// Maps a displayed person index to its store index and current value.
    pub(crate) fn resolve_person(&self, index: Index) -> Result<(Index, Person), CommandError> {
        self.store
            .people()
            .iter()
            .enumerate()
            .filter(|(_, person)| self.person_filter.matches(person))
            .nth(index.zero_based())
            .map(|(position, person)| (Index::from_zero_based(position), person.clone()))
            .ok_or(CommandError::InvalidDisplayedIndex)
    }

    pub(crate) fn resolve_event(&self, index: Index) -> Result<(Index, Event), CommandError> {
        self.store
            .event(index)
            .map(|event| (index, event.clone()))
            .ok_or(CommandError::InvalidDisplayedIndex)
    }

    /// Executes `command` and maintains undo/redo checkpoints.
    pub fn execute(&mut self, command: &Command) -> CommandOutcome {
        let keyword = command.word().keyword();
        let checkpoint = command.is_undoable().then(|| self.store.snapshot());
        let revision_before = self.store.revision();

        match command.execute(self) {
            Ok(result) => {
                if let Some(snapshot) = checkpoint {
                    self.push_checkpoint(snapshot);
                    self.redo_stack.clear();
                }
                info!(
                    "event=command_execute module=session status=ok command={} revision={} mutated={}",
                    keyword,
                    self.store.revision(),
                    self.store.revision() != revision_before
                );
                Ok(result)
            }
            Err(err) => {
                warn!(
                    "event=command_execute module=session status=error command={} error={}",
                    keyword, err
                );
                Err(err)
            }
        }
    }

    fn push_checkpoint(&mut self, snapshot: StoreSnapshot) {
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > MAX_UNDO_DEPTH {
            self.undo_stack.remove(0);
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub(crate) fn undo(&mut self) -> Result<(), CommandError> {
        let previous = self.undo_stack.pop().ok_or(CommandError::NothingToUndo)?;
        let current = self.store.snapshot();
        if let Err(err) = self.store.reset(previous.clone()) {
            self.undo_stack.push(previous);
            return Err(err.into());
        }
        self.redo_stack.push(current);
        self.person_filter = PersonFilter::All;
        debug!(
            "event=undo module=session status=ok undo_depth={} redo_depth={}",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Ok(())
    }

    pub(crate) fn redo(&mut self) -> Result<(), CommandError> {
        let next = self.redo_stack.pop().ok_or(CommandError::NothingToRedo)?;
        let current = self.store.snapshot();
        if let Err(err) = self.store.reset(next.clone()) {
            self.redo_stack.push(next);
            return Err(err.into());
        }
        self.push_checkpoint(current);
        self.person_filter = PersonFilter::All;
        debug!(
            "event=redo module=session status=ok undo_depth={} redo_depth={}",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Ok(())
    }

    /// Input lines recorded so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub(crate) fn record_history(&mut self, line: &str) {
        self.history.push(line.trim().to_string());
        if self.history.len() > MAX_HISTORY_LEN {
            self.history.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Session, DEFAULT_THEMES, MAX_HISTORY_LEN, MAX_UNDO_DEPTH};
    use crate::bus::EventBus;
    use crate::parser::parse_command;
    use crate::repo::record_store::RecordStore;

    fn session() -> Session {
        let bus = EventBus::new();
        let store = RecordStore::new(bus.clone());
        let themes = DEFAULT_THEMES.iter().map(|theme| theme.to_string()).collect();
        Session::new(store, bus, themes)
    }

    #[test]
    fn undo_depth_is_capped() {
        let mut session = session();
        for n in 0..MAX_UNDO_DEPTH + 5 {
            let command = parse_command(&format!("addevent n/Meetup {n} d/12/12/2018 a/Hall"))
                .expect("parse addevent");
            session.execute(&command).expect("addevent");
        }
        assert_eq!(session.undo_depth(), MAX_UNDO_DEPTH);

        while session.can_undo() {
            session.undo().expect("undo");
        }
        assert_eq!(session.store().events().len(), 5);
        assert_eq!(session.store().events()[4].name.as_str(), "Meetup 4");
    }

    #[test]
    fn history_keeps_most_recent_lines() {
        let mut session = session();
        for n in 0..MAX_HISTORY_LEN + 3 {
            session.record_history(&format!("list {n}"));
        }
        let history = session.history();
        assert_eq!(history.len(), MAX_HISTORY_LEN);
        assert_eq!(history[0], "list 3");
        assert_eq!(
            history[MAX_HISTORY_LEN - 1],
            format!("list {}", MAX_HISTORY_LEN + 2)
        );
    }
}
