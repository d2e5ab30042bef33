//! Prefix-based argument tokenizer.
//!
//! Splits an argument string such as `1 n/John Doe t/friends t/colleagues`
//! into a preamble (`1`) and per-prefix values. A prefix only counts when it
//! starts the string or follows whitespace, so `se/` never matches `e/`.

use std::collections::HashMap;

/// Option marker such as `n/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefix(&'static str);

impl Prefix {
    pub const fn new(marker: &'static str) -> Self {
        Self(marker)
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

pub const PREFIX_NAME: Prefix = Prefix::new("n/");
pub const PREFIX_PHONE: Prefix = Prefix::new("p/");
pub const PREFIX_HOME_NUMBER: Prefix = Prefix::new("h/");
pub const PREFIX_EMAIL: Prefix = Prefix::new("e/");
pub const PREFIX_SCH_EMAIL: Prefix = Prefix::new("se/");
pub const PREFIX_ADDRESS: Prefix = Prefix::new("a/");
pub const PREFIX_WEBSITE: Prefix = Prefix::new("w/");
pub const PREFIX_BIRTHDAY: Prefix = Prefix::new("b/");
pub const PREFIX_TAG: Prefix = Prefix::new("t/");
pub const PREFIX_DATE: Prefix = Prefix::new("d/");

/// Tokenized arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMultimap {
    preamble: String,
    values: HashMap<Prefix, Vec<String>>,
}

impl ArgumentMultimap {
    /// Text before the first recognized prefix, trimmed.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value given for `prefix`, if it appeared at all (possibly empty).
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// Last value for `prefix`, treating an empty value as absent.
    pub fn present_value(&self, prefix: Prefix) -> Option<&str> {
        self.value(prefix).filter(|value| !value.is_empty())
    }

    /// Every value given for `prefix`, in input order.
    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values
            .get(&prefix)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether every prefix has a non-empty value.
    pub fn are_present(&self, prefixes: &[Prefix]) -> bool {
        prefixes
            .iter()
            .all(|prefix| self.present_value(*prefix).is_some())
    }
}

/// Splits `args` on the given prefixes.
pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMultimap {
    let mut markers = find_markers(args, prefixes);
    markers.sort_by_key(|(position, _)| *position);

    let preamble_end = markers.first().map_or(args.len(), |(position, _)| *position);
    let mut multimap = ArgumentMultimap {
        preamble: args[..preamble_end].trim().to_string(),
        values: HashMap::new(),
    };

    for (slot, (position, prefix)) in markers.iter().enumerate() {
        let value_start = position + prefix.as_str().len();
        let value_end = markers
            .get(slot + 1)
            .map_or(args.len(), |(next, _)| *next);
        multimap
            .values
            .entry(*prefix)
            .or_default()
            .push(args[value_start..value_end].trim().to_string());
    }

    multimap
}

fn find_markers(args: &str, prefixes: &[Prefix]) -> Vec<(usize, Prefix)> {
    let mut markers = Vec::new();
    for prefix in prefixes {
        let marker = prefix.as_str();
        let mut search_from = 0;
        while let Some(found) = args[search_from..].find(marker) {
            let position = search_from + found;
            let starts_token = args[..position]
                .chars()
                .next_back()
                .map_or(true, char::is_whitespace);
            if starts_token {
                markers.push((position, *prefix));
            }
            search_from = position + marker.len();
        }
    }
    markers
}
