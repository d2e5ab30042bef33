//! Argument parsers for person commands.

use super::args::{parse_index, parse_optional, parse_tags, parse_tags_for_edit};
use super::tokenizer::{
    tokenize, ArgumentMultimap, Prefix, PREFIX_ADDRESS, PREFIX_BIRTHDAY, PREFIX_EMAIL,
    PREFIX_HOME_NUMBER, PREFIX_NAME, PREFIX_PHONE, PREFIX_SCH_EMAIL, PREFIX_TAG, PREFIX_WEBSITE,
};
use super::{ParseError, ParseResult};
use crate::command::{Command, CommandWord, EditPersonDescriptor};
use crate::model::fields::{
    Address, Birthday, Email, HomeNumber, Name, Phone, SchEmail, Website,
};
use crate::model::person::PersonDraft;

const PERSON_PREFIXES: &[Prefix] = &[
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_HOME_NUMBER,
    PREFIX_EMAIL,
    PREFIX_SCH_EMAIL,
    PREFIX_ADDRESS,
    PREFIX_WEBSITE,
    PREFIX_BIRTHDAY,
    PREFIX_TAG,
];

const REQUIRED_ADD_PREFIXES: &[Prefix] = &[
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_SCH_EMAIL,
    PREFIX_ADDRESS,
    PREFIX_WEBSITE,
    PREFIX_BIRTHDAY,
];

pub(super) fn parse_add(arguments: &str) -> ParseResult<Command> {
    let map = tokenize(arguments, PERSON_PREFIXES);
    if !map.preamble().is_empty() || !map.are_present(REQUIRED_ADD_PREFIXES) {
        return Err(ParseError::format(CommandWord::Add));
    }

    let draft = PersonDraft {
        name: Name::parse(required(&map, PREFIX_NAME))?,
        phone: Phone::parse(required(&map, PREFIX_PHONE))?,
        home_number: parse_optional(map.present_value(PREFIX_HOME_NUMBER), HomeNumber::parse)?,
        email: Email::parse(required(&map, PREFIX_EMAIL))?,
        sch_email: SchEmail::parse(required(&map, PREFIX_SCH_EMAIL))?,
        website: Website::parse(required(&map, PREFIX_WEBSITE))?,
        address: Address::parse(required(&map, PREFIX_ADDRESS))?,
        birthday: Birthday::parse(required(&map, PREFIX_BIRTHDAY))?,
        tags: parse_tags(map.all_values(PREFIX_TAG))?,
    };
    Ok(Command::Add { draft })
}

pub(super) fn parse_edit(arguments: &str) -> ParseResult<Command> {
    let map = tokenize(arguments, PERSON_PREFIXES);
    let index = parse_index(map.preamble()).ok_or(ParseError::format(CommandWord::Edit))?;

    let changes = EditPersonDescriptor {
        name: parse_optional(map.present_value(PREFIX_NAME), Name::parse)?,
        phone: parse_optional(map.present_value(PREFIX_PHONE), Phone::parse)?,
        home_number: parse_optional(map.present_value(PREFIX_HOME_NUMBER), HomeNumber::parse)?,
        email: parse_optional(map.present_value(PREFIX_EMAIL), Email::parse)?,
        sch_email: parse_optional(map.present_value(PREFIX_SCH_EMAIL), SchEmail::parse)?,
        website: parse_optional(map.present_value(PREFIX_WEBSITE), Website::parse)?,
        address: parse_optional(map.present_value(PREFIX_ADDRESS), Address::parse)?,
        birthday: parse_optional(map.present_value(PREFIX_BIRTHDAY), Birthday::parse)?,
        tags: parse_tags_for_edit(map.all_values(PREFIX_TAG))?,
    };
    if !changes.is_any_field_edited() {
        return Err(ParseError::NothingToEdit);
    }
    Ok(Command::Edit { index, changes })
}

// Presence was checked by `are_present`.
fn required(map: &ArgumentMultimap, prefix: Prefix) -> &str {
    map.present_value(prefix).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use crate::command::{Command, CommandWord};
    use crate::model::fields::FieldKind;
    use crate::parser::{parse_command, ParseError};

    const JOHN: &str = "add n/John Doe p/98765432 e/johnd@example.com se/johnd@u.nus.edu \
a/311, Clementi Ave 2 w/johndoe.com b/01/01/1990 t/friends t/owesMoney";

    #[test]
    fn add_builds_draft_with_all_fields() {
        let Command::Add { draft } = parse_command(JOHN).expect("valid add") else {
            panic!("expected add command");
        };
        assert_eq!(draft.name.as_str(), "John Doe");
        assert_eq!(draft.address.as_str(), "311, Clementi Ave 2");
        assert!(draft.home_number.is_none());
        assert_eq!(draft.birthday.to_string(), "01/01/1990");
        assert_eq!(draft.tags.len(), 2);
    }

    #[test]
    fn add_missing_required_prefix_reports_usage() {
        let err = parse_command("add n/John Doe p/98765432").unwrap_err();
        assert_eq!(err, ParseError::format(CommandWord::Add));
        assert!(err.to_string().contains("Invalid command format!"));
    }

    #[test]
    fn add_with_preamble_reports_usage() {
        let input = JOHN.replacen("add ", "add junk ", 1);
        assert_eq!(
            parse_command(&input).unwrap_err(),
            ParseError::format(CommandWord::Add)
        );
    }

    #[test]
    fn add_reports_first_invalid_field_in_order() {
        let input = JOHN
            .replace("p/98765432", "p/12")
            .replace("e/johnd@example.com", "e/not-an-email");
        let err = parse_command(&input).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidValue(crate::model::fields::ValidationError::new(FieldKind::Phone))
        );
    }

    #[test]
    fn add_accepts_optional_home_number() {
        let input = JOHN.replace("p/98765432", "p/98765432 h/65551234");
        let Command::Add { draft } = parse_command(&input).expect("valid add") else {
            panic!("expected add command");
        };
        assert_eq!(draft.home_number.map(String::from), Some("65551234".to_string()));
    }

    #[test]
    fn edit_requires_index_and_a_field() {
        assert_eq!(
            parse_command("edit n/Amy").unwrap_err(),
            ParseError::format(CommandWord::Edit)
        );
        assert_eq!(parse_command("edit 1").unwrap_err(), ParseError::NothingToEdit);
        assert_eq!(parse_command("edit 1 n/").unwrap_err(), ParseError::NothingToEdit);
    }

    #[test]
    fn edit_empty_tag_clears_tags() {
        let Command::Edit { index, changes } = parse_command("edit 2 t/").expect("valid edit") else {
            panic!("expected edit command");
        };
        assert_eq!(index.one_based(), 2);
        assert_eq!(changes.tags.map(|tags| tags.len()), Some(0));
    }

    #[test]
    fn edit_validates_supplied_fields() {
        let err = parse_command("edit 1 b/31/02/1990").unwrap_err();
        assert_eq!(err.to_string(), FieldKind::Birthday.constraint());
    }
}
