//! Validated value objects for person and event fields.
//!
//! # Responsibility
//! - Turn raw user strings into immutable typed field values.
//! - Carry one fixed, user-facing constraint message per field kind.
//!
//! # Invariants
//! - Construction is all-or-nothing: a value either passes its constraint or
//!   no value exists.
//! - Inputs are trimmed before validation; stored values are the trimmed form.
//! - Dates are kept in canonical `DD/MM/YYYY` form.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MESSAGE_NAME_CONSTRAINTS: &str =
    "Person names should only contain alphanumeric characters and spaces, and it should not be blank";
pub const MESSAGE_PHONE_CONSTRAINTS: &str =
    "Phone numbers can only contain numbers, and should be at least 3 digits long";
pub const MESSAGE_HOME_NUMBER_CONSTRAINTS: &str =
    "Home numbers can only contain numbers, and should be at least 3 digits long";
pub const MESSAGE_EMAIL_CONSTRAINTS: &str =
    "Person emails should be 2 alphanumeric/period strings separated by '@'";
pub const MESSAGE_SCH_EMAIL_CONSTRAINTS: &str =
    "Person school emails should be 2 alphanumeric/period strings separated by '@'";
pub const MESSAGE_WEBSITE_CONSTRAINTS: &str =
    "Person websites should be a domain name such as `example.com`, optionally prefixed with http:// or https://";
pub const MESSAGE_ADDRESS_CONSTRAINTS: &str =
    "Person addresses can take any values, and it should not be blank";
pub const MESSAGE_BIRTHDAY_CONSTRAINTS: &str =
    "Birthdays should be in the format DD/MM/YYYY, be a valid calendar date and not lie in the future";
pub const MESSAGE_DATE_CONSTRAINTS: &str =
    "Event dates should be in the format DD/MM/YYYY and be a valid calendar date";
pub const MESSAGE_TAG_CONSTRAINTS: &str = "Tags names should be alphanumeric";

const DATE_FORMAT: &str = "%d/%m/%Y";

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[[:alnum:]][[:alnum:] ]*$").expect("valid name regex"));
static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,}$").expect("valid digits regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.]+@[\w.]+$").expect("valid email regex"));
static WEBSITE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+(?:/\S*)?$")
        .expect("valid website regex")
});
static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S.*$").expect("valid address regex"));
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("valid date regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[[:alnum:]]+$").expect("valid tag regex"));

/// Field kinds that carry validation constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Name,
    Phone,
    HomeNumber,
    Email,
    SchEmail,
    Website,
    Address,
    Birthday,
    EventDate,
    Tag,
}

impl FieldKind {
    /// Stable field id used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::HomeNumber => "home_number",
            Self::Email => "email",
            Self::SchEmail => "sch_email",
            Self::Website => "website",
            Self::Address => "address",
            Self::Birthday => "birthday",
            Self::EventDate => "event_date",
            Self::Tag => "tag",
        }
    }

    /// User-facing constraint message for this field.
    pub fn constraint(self) -> &'static str {
        match self {
            Self::Name => MESSAGE_NAME_CONSTRAINTS,
            Self::Phone => MESSAGE_PHONE_CONSTRAINTS,
            Self::HomeNumber => MESSAGE_HOME_NUMBER_CONSTRAINTS,
            Self::Email => MESSAGE_EMAIL_CONSTRAINTS,
            Self::SchEmail => MESSAGE_SCH_EMAIL_CONSTRAINTS,
            Self::Website => MESSAGE_WEBSITE_CONSTRAINTS,
            Self::Address => MESSAGE_ADDRESS_CONSTRAINTS,
            Self::Birthday => MESSAGE_BIRTHDAY_CONSTRAINTS,
            Self::EventDate => MESSAGE_DATE_CONSTRAINTS,
            Self::Tag => MESSAGE_TAG_CONSTRAINTS,
        }
    }
}

/// Rejected field value.
///
/// `Display` renders only the constraint message, which is what the parser
/// surfaces to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: FieldKind,
}

impl ValidationError {
    pub fn new(field: FieldKind) -> Self {
        Self { field }
    }

    pub fn message(&self) -> &'static str {
        self.field.constraint()
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for ValidationError {}

/// Declares a string-backed value object checked by one regex.
macro_rules! regex_field {
    ($(#[$meta:meta])* $name:ident, $kind:expr, $re:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validates and wraps a raw value.
            pub fn parse(raw: &str) -> Result<Self, ValidationError> {
                let trimmed = raw.trim();
                if $re.is_match(trimmed) {
                    Ok(Self(trimmed.to_string()))
                } else {
                    Err(ValidationError::new($kind))
                }
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

regex_field!(
    /// Person or event name.
    Name,
    FieldKind::Name,
    NAME_RE
);
regex_field!(
    /// Mobile phone number.
    Phone,
    FieldKind::Phone,
    DIGITS_RE
);
regex_field!(
    /// Landline number.
    HomeNumber,
    FieldKind::HomeNumber,
    DIGITS_RE
);
regex_field!(
    /// Personal email address.
    Email,
    FieldKind::Email,
    EMAIL_RE
);
regex_field!(
    /// School email address.
    SchEmail,
    FieldKind::SchEmail,
    EMAIL_RE
);
regex_field!(
    /// Personal website.
    Website,
    FieldKind::Website,
    WEBSITE_RE
);
regex_field!(
    /// Free-form postal address.
    Address,
    FieldKind::Address,
    ADDRESS_RE
);
regex_field!(
    /// Alphanumeric label attached to a person.
    Tag,
    FieldKind::Tag,
    TAG_RE
);

impl Name {
    /// Lowercased form used by identity checks and keyword search.
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }
}

fn parse_calendar_date(raw: &str, kind: FieldKind) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    if !DATE_RE.is_match(trimmed) {
        return Err(ValidationError::new(kind));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| ValidationError::new(kind))
}

/// Date of birth; never later than today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday(NaiveDate);

impl Birthday {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let date = parse_calendar_date(raw, FieldKind::Birthday)?;
        if date > Local::now().date_naive() {
            return Err(ValidationError::new(FieldKind::Birthday));
        }
        Ok(Self(date))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

/// Calendar day an event takes place on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventDate(NaiveDate);

impl EventDate {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        parse_calendar_date(raw, FieldKind::EventDate).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl Display for Birthday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Display for EventDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl TryFrom<String> for Birthday {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

impl TryFrom<String> for EventDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

impl From<Birthday> for String {
    fn from(value: Birthday) -> Self {
        value.to_string()
    }
}

impl From<EventDate> for String {
    fn from(value: EventDate) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Address, Birthday, Email, EventDate, FieldKind, HomeNumber, Name, Phone, SchEmail, Tag,
        ValidationError, Website, MESSAGE_NAME_CONSTRAINTS,
    };

    #[test]
    fn name_accepts_alphanumeric_words_and_trims() {
        let name = Name::parse("  John Doe 2nd ").expect("valid name");
        assert_eq!(name.as_str(), "John Doe 2nd");
        assert_eq!(name.folded(), "john doe 2nd");
    }

    #[test]
    fn name_rejects_blank_and_symbols() {
        assert_eq!(
            Name::parse("   ").unwrap_err(),
            ValidationError::new(FieldKind::Name)
        );
        let err = Name::parse("James&").unwrap_err();
        assert_eq!(err.to_string(), MESSAGE_NAME_CONSTRAINTS);
    }

    #[test]
    fn numbers_require_three_digits() {
        assert!(Phone::parse("911").is_ok());
        assert!(Phone::parse("91").is_err());
        assert!(Phone::parse("9011p041").is_err());
        assert!(HomeNumber::parse("65551234").is_ok());
        assert_eq!(
            HomeNumber::parse("12").unwrap_err().field,
            FieldKind::HomeNumber
        );
    }

    #[test]
    fn emails_need_local_part_and_domain() {
        assert!(Email::parse("john@example.com").is_ok());
        assert!(Email::parse("john.example.com").is_err());
        assert!(Email::parse("@example.com").is_err());
        assert!(SchEmail::parse("e0123456@u.nus.edu").is_ok());
        assert_eq!(
            SchEmail::parse("peter@").unwrap_err().field,
            FieldKind::SchEmail
        );
    }

    #[test]
    fn website_accepts_bare_domain_and_scheme() {
        assert!(Website::parse("john.com").is_ok());
        assert!(Website::parse("https://www.example.org/profile").is_ok());
        assert!(Website::parse("localhost").is_err());
        assert!(Website::parse("ftp://example.com").is_err());
    }

    #[test]
    fn address_must_not_be_blank() {
        assert!(Address::parse("Sentosa, Siloso Beach").is_ok());
        assert!(Address::parse("  ").is_err());
    }

    #[test]
    fn birthday_requires_real_past_date() {
        let birthday = Birthday::parse("01/01/1990").expect("valid birthday");
        assert_eq!(birthday.to_string(), "01/01/1990");
        assert!(Birthday::parse("31/02/1990").is_err());
        assert!(Birthday::parse("1/1/1990").is_err());
        assert!(Birthday::parse("01/01/9999").is_err());
    }

    #[test]
    fn event_date_allows_future_but_checks_calendar() {
        assert!(EventDate::parse("12/12/2099").is_ok());
        assert!(EventDate::parse("29/02/2019").is_err());
        assert!(EventDate::parse("29/02/2020").is_ok());
        assert_eq!(
            EventDate::parse("2018-12-12").unwrap_err().field,
            FieldKind::EventDate
        );
    }

    #[test]
    fn tags_are_single_alphanumeric_words() {
        assert!(Tag::parse("friends").is_ok());
        assert!(Tag::parse("best friend").is_err());
        assert!(Tag::parse("#friend").is_err());
        assert!(Tag::parse("").is_err());
    }
}
