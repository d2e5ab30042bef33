//! Command-line parser and keyword dispatcher.
//!
//! # Responsibility
//! - Split a raw input line into keyword and arguments.
//! - Route to the per-command parser that builds a `Command`.
//!
//! # Invariants
//! - Syntactic checks (keyword, required prefixes, index shape) run before
//!   any field validator.
//! - The first failing validator short-circuits parsing.
//! - Parsing never touches session or store state.

mod args;
mod event;
mod person;
pub mod tokenizer;

pub use args::parse_index;

use crate::command::{Command, CommandWord};
use crate::model::fields::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MESSAGE_INVALID_COMMAND_FORMAT: &str = "Invalid command format! \n";
pub const MESSAGE_UNKNOWN_COMMAND: &str = "Unknown command";

pub type ParseResult<T> = Result<T, ParseError>;

/// Malformed or incomplete input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input does not match the command's shape; carries its usage text.
    InvalidFormat { usage: &'static str },
    UnknownCommand,
    /// A field value failed its constraint.
    InvalidValue(ValidationError),
    /// `edit`/`editevent` without any field to change.
    NothingToEdit,
}

impl ParseError {
    pub(crate) fn format(word: CommandWord) -> Self {
        Self::InvalidFormat {
            usage: word.usage(),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat { usage } => write!(f, "{MESSAGE_INVALID_COMMAND_FORMAT}{usage}"),
            Self::UnknownCommand => f.write_str(MESSAGE_UNKNOWN_COMMAND),
            Self::InvalidValue(err) => write!(f, "{err}"),
            Self::NothingToEdit => f.write_str(crate::command::person::MESSAGE_NOT_EDITED),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidValue(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ParseError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidValue(value)
    }
}

/// Parses one raw input line into a command.
pub fn parse_command(input: &str) -> ParseResult<Command> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::format(CommandWord::Help));
    }

    let (keyword, arguments) = match trimmed.find(char::is_whitespace) {
        Some(split_at) => trimmed.split_at(split_at),
        None => (trimmed, ""),
    };
    let word = CommandWord::from_keyword(keyword).ok_or(ParseError::UnknownCommand)?;

    match word {
        CommandWord::Add => person::parse_add(arguments),
        CommandWord::Edit => person::parse_edit(arguments),
        CommandWord::Delete => {
            args::parse_index_only(arguments, word).map(|index| Command::Delete { index })
        }
        CommandWord::Favourite => {
            args::parse_index_only(arguments, word).map(|index| Command::Favourite { index })
        }
        CommandWord::Unfavourite => {
            args::parse_index_only(arguments, word).map(|index| Command::Unfavourite { index })
        }
        CommandWord::Select => {
            args::parse_index_only(arguments, word).map(|index| Command::Select { index })
        }
        CommandWord::SwitchTheme => {
            args::parse_index_only(arguments, word).map(|index| Command::SwitchTheme { index })
        }
        CommandWord::Find => parse_find(arguments),
        CommandWord::List => Ok(Command::List),
        CommandWord::Clear => Ok(Command::Clear),
        CommandWord::Undo => Ok(Command::Undo),
        CommandWord::Redo => Ok(Command::Redo),
        CommandWord::History => Ok(Command::History),
        CommandWord::Help => Ok(Command::Help),
        CommandWord::Exit => Ok(Command::Exit),
        CommandWord::AddEvent => event::parse_add_event(arguments),
        CommandWord::DeleteEvent => args::parse_index_only(arguments, word)
            .map(|index| Command::DeleteEvent { index }),
        CommandWord::EditEvent => event::parse_edit_event(arguments),
    }
}

fn parse_find(arguments: &str) -> ParseResult<Command> {
    let keywords: Vec<String> = arguments
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if keywords.is_empty() {
        return Err(ParseError::format(CommandWord::Find));
    }
    Ok(Command::Find { keywords })
}

#[cfg(test)]
mod tests {
    use super::{parse_command, ParseError, MESSAGE_UNKNOWN_COMMAND};
    use crate::command::{Command, CommandWord};
    use crate::model::index::Index;

    #[test]
    fn keywords_and_aliases_map_to_same_command() {
        let first = Index::from_one_based(1).expect("index");
        assert_eq!(
            parse_command("delete 1").expect("delete"),
            Command::Delete { index: first }
        );
        assert_eq!(
            parse_command("d 1").expect("alias"),
            Command::Delete { index: first }
        );
        assert_eq!(
            parse_command("st 1").expect("theme alias"),
            Command::SwitchTheme { index: first }
        );
    }

    #[test]
    fn keywords_are_case_sensitive() {
        let err = parse_command("LIST").unwrap_err();
        assert_eq!(err, ParseError::UnknownCommand);
        assert_eq!(err.to_string(), MESSAGE_UNKNOWN_COMMAND);
    }

    #[test]
    fn blank_input_reports_help_usage() {
        let err = parse_command("   ").unwrap_err();
        assert_eq!(err, ParseError::format(CommandWord::Help));
        assert!(err.to_string().starts_with("Invalid command format! \n"));
    }

    #[test]
    fn find_requires_keywords() {
        assert_eq!(
            parse_command("find").unwrap_err(),
            ParseError::format(CommandWord::Find)
        );
        assert_eq!(
            parse_command("find  Alice bob").expect("find"),
            Command::Find {
                keywords: vec!["Alice".to_string(), "bob".to_string()]
            }
        );
    }

    #[test]
    fn argument_free_commands_ignore_trailing_text() {
        assert_eq!(parse_command("list all").expect("list"), Command::List);
        assert_eq!(parse_command("undo").expect("undo"), Command::Undo);
        assert_eq!(parse_command("exit").expect("exit"), Command::Exit);
    }

    #[test]
    fn index_commands_reject_non_positive_or_text() {
        for input in ["unfav a", "unfav 0", "unfav", "unfav 1 2"] {
            assert_eq!(
                parse_command(input).unwrap_err(),
                ParseError::format(CommandWord::Unfavourite),
                "input: {input}"
            );
        }
    }
}
