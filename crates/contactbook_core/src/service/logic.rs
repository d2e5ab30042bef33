//! Input-line entry point.
//!
//! # Responsibility
//! - Turn one raw input line into a `CommandResult` or a user-facing error.
//! - Record successfully parsed lines in the session history.
//!
//! # Invariants
//! - Lines that fail to parse never reach the session.
//! - History is appended after execution, so `history` never lists itself
//!   on its own run.

use crate::command::{CommandError, CommandResult};
use crate::parser::{parse_command, ParseError};
use crate::service::session::Session;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure of one `process_input` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicError {
    Parse(ParseError),
    Command(CommandError),
}

impl Display for LogicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Command(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LogicError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Command(err) => Some(err),
        }
    }
}

impl From<ParseError> for LogicError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<CommandError> for LogicError {
    fn from(value: CommandError) -> Self {
        Self::Command(value)
    }
}

/// Parse-then-execute facade over a `Session`.
pub struct Logic {
    session: Session,
}

impl Logic {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Parses and executes one input line.
    pub fn process_input(&mut self, raw_line: &str) -> Result<CommandResult, LogicError> {
        let command = match parse_command(raw_line) {
            Ok(command) => command,
            Err(err) => {
                debug!(
                    "event=command_parse module=logic status=error error_code={}",
                    parse_error_code(&err)
                );
                return Err(err.into());
            }
        };

        let outcome = self.session.execute(&command);
        self.session.record_history(raw_line);
        if let Err(err) = &outcome {
            warn!(
                "event=process_input module=logic status=error command={} error={}",
                command.word().keyword(),
                err
            );
        }
        outcome.map_err(LogicError::from)
    }
}

fn parse_error_code(err: &ParseError) -> &'static str {
    match err {
        ParseError::InvalidFormat { .. } => "invalid_format",
        ParseError::UnknownCommand => "unknown_command",
        ParseError::InvalidValue(value) => value.field.as_str(),
        ParseError::NothingToEdit => "nothing_to_edit",
    }
}

#[cfg(test)]
mod tests {
    use super::{Logic, LogicError};
    use crate::bus::EventBus;
    use crate::command::general::{MESSAGE_HISTORY_SUCCESS, MESSAGE_NO_HISTORY};
    use crate::parser::ParseError;
    use crate::repo::record_store::RecordStore;
    use crate::service::session::{Session, DEFAULT_THEMES};

    fn logic() -> Logic {
        let bus = EventBus::new();
        let store = RecordStore::new(bus.clone());
        let themes = DEFAULT_THEMES.iter().map(|theme| theme.to_string()).collect();
        Logic::new(Session::new(store, bus, themes))
    }

    #[test]
    fn unparsable_lines_are_not_recorded() {
        let mut logic = logic();
        let err = logic.process_input("bogus").unwrap_err();
        assert_eq!(err, LogicError::Parse(ParseError::UnknownCommand));
        assert!(logic.session().history().is_empty());
    }

    #[test]
    fn history_lists_recent_first_and_excludes_itself() {
        let mut logic = logic();
        let first = logic.process_input("history").expect("history");
        assert_eq!(first.feedback, MESSAGE_NO_HISTORY);

        logic.process_input("list").expect("list");
        logic.process_input("  undo ").unwrap_err();
        let result = logic.process_input("history").expect("history");
        assert_eq!(
            result.feedback,
            format!("{MESSAGE_HISTORY_SUCCESS}undo\nlist\nhistory")
        );
    }
}
