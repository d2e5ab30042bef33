//! Shared argument conversions used by per-command parsers.

use super::{ParseError, ParseResult};
use crate::command::CommandWord;
use crate::model::fields::{Tag, ValidationError};
use crate::model::index::Index;
use std::collections::BTreeSet;

/// Parses a non-zero unsigned integer into an `Index`.
pub fn parse_index(raw: &str) -> Option<Index> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    trimmed
        .parse::<usize>()
        .ok()
        .and_then(Index::from_one_based)
}

/// Parser for commands whose only argument is a displayed index.
pub(super) fn parse_index_only(arguments: &str, word: CommandWord) -> ParseResult<Index> {
    parse_index(arguments).ok_or(ParseError::format(word))
}

/// Validates every tag value; duplicates collapse into one.
pub fn parse_tags(values: &[String]) -> Result<BTreeSet<Tag>, ValidationError> {
    values.iter().map(|value| Tag::parse(value)).collect()
}

/// Tags for `edit`: absent stays `None`; a lone set of empty values clears.
pub fn parse_tags_for_edit(values: &[String]) -> Result<Option<BTreeSet<Tag>>, ValidationError> {
    if values.is_empty() {
        return Ok(None);
    }
    if values.iter().all(|value| value.is_empty()) {
        return Ok(Some(BTreeSet::new()));
    }
    parse_tags(values).map(Some)
}

/// Runs `parse` on `value` when it is present.
pub fn parse_optional<T>(
    value: Option<&str>,
    parse: impl Fn(&str) -> Result<T, ValidationError>,
) -> Result<Option<T>, ValidationError> {
    value.map(parse).transpose()
}

#[cfg(test)]
mod tests {
    use super::{parse_index, parse_index_only, parse_tags, parse_tags_for_edit};
    use crate::command::CommandWord;
    use crate::model::fields::FieldKind;
    use crate::parser::ParseError;

    #[test]
    fn parse_index_accepts_positive_integers_only() {
        assert_eq!(parse_index(" 2 ").map(|index| index.zero_based()), Some(1));
        assert!(parse_index("0").is_none());
        assert!(parse_index("-1").is_none());
        assert!(parse_index("+1").is_none());
        assert!(parse_index("a").is_none());
        assert!(parse_index("1 2").is_none());
        assert!(parse_index("99999999999999999999999").is_none());
    }

    #[test]
    fn index_only_errors_carry_the_command_usage() {
        assert_eq!(
            parse_index_only("3", CommandWord::Select).map(|index| index.zero_based()),
            Ok(2)
        );
        assert_eq!(
            parse_index_only("0", CommandWord::DeleteEvent),
            Err(ParseError::format(CommandWord::DeleteEvent))
        );
        assert_eq!(
            parse_index_only("1 n/Amy", CommandWord::Favourite),
            Err(ParseError::format(CommandWord::Favourite))
        );
    }

    #[test]
    fn parse_tags_collapses_duplicates() {
        let tags = parse_tags(&[
            "friends".to_string(),
            "work".to_string(),
            "friends".to_string(),
        ])
        .expect("valid tags");
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn parse_tags_rejects_invalid_value() {
        let err = parse_tags(&["best friend".to_string()]).unwrap_err();
        assert_eq!(err.field, FieldKind::Tag);
    }

    #[test]
    fn edit_tags_distinguish_absent_and_clear() {
        assert_eq!(parse_tags_for_edit(&[]).expect("absent"), None);
        assert_eq!(
            parse_tags_for_edit(&[String::new()])
                .expect("clear")
                .map(|tags| tags.len()),
            Some(0)
        );
    }
}
