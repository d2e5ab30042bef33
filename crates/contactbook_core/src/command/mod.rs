//! Command objects: one variant per user-facing operation.
//!
//! # Responsibility
//! - Hold fully validated parameters for each operation.
//! - Execute against a `Session` and translate store failures into fixed,
//!   user-facing messages.
//!
//! # Invariants
//! - Commands are immutable values; only session/store state changes.
//! - A failed `execute` leaves the store untouched and publishes no
//!   `StoreChanged` event.
//! - Indices resolve against the displayed view, not raw storage order.

pub mod event;
pub mod general;
pub mod person;

pub use event::{EditEventDescriptor, EventDraft};
pub use person::EditPersonDescriptor;

use crate::model::index::Index;
use crate::model::person::PersonDraft;
use crate::repo::record_store::{RecordKind, StoreError};
use crate::service::session::Session;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MESSAGE_INVALID_DISPLAYED_INDEX: &str = "The index provided is invalid";
pub const MESSAGE_DUPLICATE_PERSON: &str = "This person already exists in the address book";
pub const MESSAGE_DUPLICATE_EVENT: &str = "This event already exists in the address book";
pub const MESSAGE_ALREADY_FAVOURITE: &str = "This person is already in your favourites";
pub const MESSAGE_NOT_FAVOURITE: &str = "This person is not in your favourites";
pub const MESSAGE_NOTHING_TO_UNDO: &str = "No more commands to undo!";
pub const MESSAGE_NOTHING_TO_REDO: &str = "No more commands to redo!";

/// Presentation directive attached to a successful result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    ShowHelp,
    Exit,
    SwitchTheme(String),
    SelectPerson(Index),
}

/// Successful command outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Human-readable summary shown to the user.
    pub feedback: String,
    pub ui_action: Option<UiAction>,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            ui_action: None,
        }
    }

    pub fn with_action(feedback: impl Into<String>, action: UiAction) -> Self {
        Self {
            feedback: feedback.into(),
            ui_action: Some(action),
        }
    }
}

/// Semantic precondition failure raised while executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    InvalidDisplayedIndex,
    DuplicatePerson,
    DuplicateEvent,
    AlreadyFavourite,
    NotFavourite,
    NothingToUndo,
    NothingToRedo,
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::InvalidDisplayedIndex => MESSAGE_INVALID_DISPLAYED_INDEX,
            Self::DuplicatePerson => MESSAGE_DUPLICATE_PERSON,
            Self::DuplicateEvent => MESSAGE_DUPLICATE_EVENT,
            Self::AlreadyFavourite => MESSAGE_ALREADY_FAVOURITE,
            Self::NotFavourite => MESSAGE_NOT_FAVOURITE,
            Self::NothingToUndo => MESSAGE_NOTHING_TO_UNDO,
            Self::NothingToRedo => MESSAGE_NOTHING_TO_REDO,
        };
        f.write_str(message)
    }
}

impl Error for CommandError {}

impl From<StoreError> for CommandError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::DuplicateEntity(RecordKind::Person) => Self::DuplicatePerson,
            StoreError::DuplicateEntity(RecordKind::Event) => Self::DuplicateEvent,
            StoreError::IndexOutOfRange { .. } => Self::InvalidDisplayedIndex,
        }
    }
}

pub type CommandOutcome = Result<CommandResult, CommandError>;

/// Keyword table entry for one command kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandWord {
    Add,
    Edit,
    Delete,
    Favourite,
    Unfavourite,
    Select,
    Find,
    List,
    Clear,
    Undo,
    Redo,
    History,
    Help,
    Exit,
    SwitchTheme,
    AddEvent,
    DeleteEvent,
    EditEvent,
}

const COMMAND_WORDS: &[CommandWord] = &[
    CommandWord::Add,
    CommandWord::Edit,
    CommandWord::Delete,
    CommandWord::Favourite,
    CommandWord::Unfavourite,
    CommandWord::Select,
    CommandWord::Find,
    CommandWord::List,
    CommandWord::Clear,
    CommandWord::Undo,
    CommandWord::Redo,
    CommandWord::History,
    CommandWord::Help,
    CommandWord::Exit,
    CommandWord::SwitchTheme,
    CommandWord::AddEvent,
    CommandWord::DeleteEvent,
    CommandWord::EditEvent,
];

impl CommandWord {
    /// Resolves a case-sensitive keyword or alias.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        COMMAND_WORDS
            .iter()
            .copied()
            .find(|word| word.keyword() == keyword || word.alias() == Some(keyword))
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Favourite => "fav",
            Self::Unfavourite => "unfav",
            Self::Select => "select",
            Self::Find => "find",
            Self::List => "list",
            Self::Clear => "clear",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::History => "history",
            Self::Help => "help",
            Self::Exit => "exit",
            Self::SwitchTheme => "switchtheme",
            Self::AddEvent => "addevent",
            Self::DeleteEvent => "deleteevent",
            Self::EditEvent => "editevent",
        }
    }

    pub fn alias(self) -> Option<&'static str> {
        match self {
            Self::Add => Some("a"),
            Self::Edit => Some("e"),
            Self::Delete => Some("d"),
            Self::Favourite => Some("favourite"),
            Self::Unfavourite => Some("unfavourite"),
            Self::Select => Some("s"),
            Self::Find => Some("f"),
            Self::List => Some("l"),
            Self::Clear => Some("c"),
            Self::Undo => Some("u"),
            Self::Redo => Some("r"),
            Self::History => Some("h"),
            Self::Help | Self::Exit => None,
            Self::SwitchTheme => Some("st"),
            Self::AddEvent => Some("ae"),
            Self::DeleteEvent => Some("de"),
            Self::EditEvent => Some("ee"),
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Self::Add => person::ADD_USAGE,
            Self::Edit => person::EDIT_USAGE,
            Self::Delete => person::DELETE_USAGE,
            Self::Favourite => person::FAVOURITE_USAGE,
            Self::Unfavourite => person::UNFAVOURITE_USAGE,
            Self::Select => person::SELECT_USAGE,
            Self::Find => general::FIND_USAGE,
            Self::List => general::LIST_USAGE,
            Self::Clear => general::CLEAR_USAGE,
            Self::Undo => general::UNDO_USAGE,
            Self::Redo => general::REDO_USAGE,
            Self::History => general::HISTORY_USAGE,
            Self::Help => general::HELP_USAGE,
            Self::Exit => general::EXIT_USAGE,
            Self::SwitchTheme => general::SWITCH_THEME_USAGE,
            Self::AddEvent => event::ADD_EVENT_USAGE,
            Self::DeleteEvent => event::DELETE_EVENT_USAGE,
            Self::EditEvent => event::EDIT_EVENT_USAGE,
        }
    }

    /// Every known command kind, in help order.
    pub fn all() -> &'static [CommandWord] {
        COMMAND_WORDS
    }
}

/// A parsed, not yet executed, user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { draft: PersonDraft },
    Edit { index: Index, changes: EditPersonDescriptor },
    Delete { index: Index },
    Favourite { index: Index },
    Unfavourite { index: Index },
    Select { index: Index },
    Find { keywords: Vec<String> },
    List,
    Clear,
    Undo,
    Redo,
    History,
    Help,
    Exit,
    SwitchTheme { index: Index },
    AddEvent { draft: EventDraft },
    DeleteEvent { index: Index },
    EditEvent { index: Index, changes: EditEventDescriptor },
}

impl Command {
    pub fn word(&self) -> CommandWord {
        match self {
            Self::Add { .. } => CommandWord::Add,
            Self::Edit { .. } => CommandWord::Edit,
            Self::Delete { .. } => CommandWord::Delete,
            Self::Favourite { .. } => CommandWord::Favourite,
            Self::Unfavourite { .. } => CommandWord::Unfavourite,
            Self::Select { .. } => CommandWord::Select,
            Self::Find { .. } => CommandWord::Find,
            Self::List => CommandWord::List,
            Self::Clear => CommandWord::Clear,
            Self::Undo => CommandWord::Undo,
            Self::Redo => CommandWord::Redo,
            Self::History => CommandWord::History,
            Self::Help => CommandWord::Help,
            Self::Exit => CommandWord::Exit,
            Self::SwitchTheme { .. } => CommandWord::SwitchTheme,
            Self::AddEvent { .. } => CommandWord::AddEvent,
            Self::DeleteEvent { .. } => CommandWord::DeleteEvent,
            Self::EditEvent { .. } => CommandWord::EditEvent,
        }
    }

    /// Whether a successful run can be reverted with `undo`.
    pub fn is_undoable(&self) -> bool {
        matches!(
            self,
            Self::Add { .. }
                | Self::Edit { .. }
                | Self::Delete { .. }
                | Self::Favourite { .. }
                | Self::Unfavourite { .. }
                | Self::Clear
                | Self::AddEvent { .. }
                | Self::DeleteEvent { .. }
                | Self::EditEvent { .. }
        )
    }

    /// Runs the command against `session`.
    ///
    /// Prefer `Session::execute`, which also maintains undo/redo state.
    pub fn execute(&self, session: &mut Session) -> CommandOutcome {
        match self {
            Self::Add { draft } => person::add(session, draft),
            Self::Edit { index, changes } => person::edit(session, *index, changes),
            Self::Delete { index } => person::delete(session, *index),
            Self::Favourite { index } => person::set_favourite(session, *index, true),
            Self::Unfavourite { index } => person::set_favourite(session, *index, false),
            Self::Select { index } => person::select(session, *index),
            Self::Find { keywords } => general::find(session, keywords),
            Self::List => general::list(session),
            Self::Clear => general::clear(session),
            Self::Undo => general::undo(session),
            Self::Redo => general::redo(session),
            Self::History => general::history(session),
            Self::Help => general::help(session),
            Self::Exit => general::exit(session),
            Self::SwitchTheme { index } => general::switch_theme(session, *index),
            Self::AddEvent { draft } => event::add(session, draft),
            Self::DeleteEvent { index } => event::delete(session, *index),
            Self::EditEvent { index, changes } => event::edit(session, *index, changes),
        }
    }
}
