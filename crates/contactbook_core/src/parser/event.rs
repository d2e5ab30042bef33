//! Argument parsers for calendar event commands.

use super::args::{parse_index, parse_optional};
use super::tokenizer::{tokenize, Prefix, PREFIX_ADDRESS, PREFIX_DATE, PREFIX_NAME};
use super::{ParseError, ParseResult};
use crate::command::{Command, CommandWord, EditEventDescriptor, EventDraft};
use crate::model::fields::{Address, EventDate, Name};

const EVENT_PREFIXES: &[Prefix] = &[PREFIX_NAME, PREFIX_DATE, PREFIX_ADDRESS];

pub(super) fn parse_add_event(arguments: &str) -> ParseResult<Command> {
    let map = tokenize(arguments, EVENT_PREFIXES);
    let (Some(name), Some(date), Some(address)) = (
        map.present_value(PREFIX_NAME),
        map.present_value(PREFIX_DATE),
        map.present_value(PREFIX_ADDRESS),
    ) else {
        return Err(ParseError::format(CommandWord::AddEvent));
    };
    if !map.preamble().is_empty() {
        return Err(ParseError::format(CommandWord::AddEvent));
    }

    let draft = EventDraft {
        name: Name::parse(name)?,
        date: EventDate::parse(date)?,
        address: Address::parse(address)?,
    };
    Ok(Command::AddEvent { draft })
}

pub(super) fn parse_edit_event(arguments: &str) -> ParseResult<Command> {
    let map = tokenize(arguments, EVENT_PREFIXES);
    let index =
        parse_index(map.preamble()).ok_or(ParseError::format(CommandWord::EditEvent))?;

    let changes = EditEventDescriptor {
        name: parse_optional(map.present_value(PREFIX_NAME), Name::parse)?,
        date: parse_optional(map.present_value(PREFIX_DATE), EventDate::parse)?,
        address: parse_optional(map.present_value(PREFIX_ADDRESS), Address::parse)?,
    };
    if !changes.is_any_field_edited() {
        return Err(ParseError::NothingToEdit);
    }
    Ok(Command::EditEvent { index, changes })
}

#[cfg(test)]
mod tests {
    use crate::command::{Command, CommandWord};
    use crate::model::fields::{FieldKind, ValidationError};
    use crate::parser::{parse_command, ParseError};

    #[test]
    fn addevent_parses_all_fields() {
        let Command::AddEvent { draft } =
            parse_command("addevent n/ZoukOut d/12/12/2018 a/Sentosa, Siloso Beach")
                .expect("valid addevent")
        else {
            panic!("expected addevent command");
        };
        assert_eq!(draft.name.as_str(), "ZoukOut");
        assert_eq!(draft.date.to_string(), "12/12/2018");
        assert_eq!(draft.address.as_str(), "Sentosa, Siloso Beach");
    }

    #[test]
    fn addevent_missing_date_reports_usage() {
        assert_eq!(
            parse_command("ae n/ZoukOut a/Sentosa").unwrap_err(),
            ParseError::format(CommandWord::AddEvent)
        );
    }

    #[test]
    fn addevent_rejects_impossible_date() {
        assert_eq!(
            parse_command("addevent n/ZoukOut d/30/02/2018 a/Sentosa").unwrap_err(),
            ParseError::InvalidValue(ValidationError::new(FieldKind::EventDate))
        );
    }

    #[test]
    fn editevent_requires_a_field() {
        assert_eq!(
            parse_command("editevent 1").unwrap_err(),
            ParseError::NothingToEdit
        );
        let Command::EditEvent { index, changes } =
            parse_command("ee 1 d/13/12/2018").expect("valid editevent")
        else {
            panic!("expected editevent command");
        };
        assert_eq!(index.one_based(), 1);
        assert!(changes.date.is_some());
        assert!(changes.name.is_none());
    }
}
