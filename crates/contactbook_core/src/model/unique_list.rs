//! Ordered collection with a domain-specific no-duplicates rule.
//!
//! # Invariants
//! - No two elements are the same per `UniqueKey::same_identity`.
//! - A rejected insert/replace leaves the list untouched.

use crate::model::index::Index;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identity rule used for duplicate detection.
///
/// Independent of `PartialEq`: two records may differ in non-identity
/// fields and still count as the same entry.
pub trait UniqueKey {
    fn same_identity(&self, other: &Self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueListError {
    /// The element collides with an existing one.
    Duplicate,
    /// Index is not inside `0..len`.
    IndexOutOfRange { index: Index, len: usize },
}

impl Display for UniqueListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate => write!(f, "operation would result in duplicate entries"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is out of range for {len} entries")
            }
        }
    }
}

impl Error for UniqueListError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueList<T> {
    items: Vec<T>,
}

impl<T> Default for UniqueList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: UniqueKey> UniqueList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from existing items, rejecting any duplicate pair.
    pub fn from_vec(items: Vec<T>) -> Result<Self, UniqueListError> {
        for (position, item) in items.iter().enumerate() {
            if items[..position]
                .iter()
                .any(|earlier| earlier.same_identity(item))
            {
                return Err(UniqueListError::Duplicate);
            }
        }
        Ok(Self { items })
    }

    pub fn contains(&self, candidate: &T) -> bool {
        self.items.iter().any(|item| item.same_identity(candidate))
    }

    /// Appends `item` unless an equal entry exists.
    pub fn add(&mut self, item: T) -> Result<(), UniqueListError> {
        if self.contains(&item) {
            return Err(UniqueListError::Duplicate);
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes and returns the entry at `index`.
    pub fn remove(&mut self, index: Index) -> Result<T, UniqueListError> {
        self.check_index(index)?;
        Ok(self.items.remove(index.zero_based()))
    }

    /// Swaps in `item` at `index` and returns the previous entry.
    ///
    /// The replacement may share identity with the entry it replaces, but not
    /// with any other entry.
    pub fn replace(&mut self, index: Index, item: T) -> Result<T, UniqueListError> {
        self.check_index(index)?;
        let target = index.zero_based();
        let collides = self
            .items
            .iter()
            .enumerate()
            .any(|(position, existing)| position != target && existing.same_identity(&item));
        if collides {
            return Err(UniqueListError::Duplicate);
        }
        Ok(std::mem::replace(&mut self.items[target], item))
    }

    pub fn get(&self, index: Index) -> Option<&T> {
        self.items.get(index.zero_based())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn check_index(&self, index: Index) -> Result<(), UniqueListError> {
        if index.zero_based() >= self.items.len() {
            return Err(UniqueListError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{UniqueKey, UniqueList, UniqueListError};
    use crate::model::index::Index;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Entry {
        key: &'static str,
        payload: u32,
    }

    impl UniqueKey for Entry {
        fn same_identity(&self, other: &Self) -> bool {
            self.key.eq_ignore_ascii_case(other.key)
        }
    }

    fn entry(key: &'static str, payload: u32) -> Entry {
        Entry { key, payload }
    }

    #[test]
    fn add_rejects_same_identity_without_mutation() {
        let mut list = UniqueList::new();
        list.add(entry("alice", 1)).expect("first add");
        let err = list.add(entry("ALICE", 2)).unwrap_err();
        assert_eq!(err, UniqueListError::Duplicate);
        assert_eq!(list.as_slice(), &[entry("alice", 1)]);
    }

    #[test]
    fn replace_allows_self_but_not_other_identity() {
        let mut list = UniqueList::from_vec(vec![entry("a", 1), entry("b", 2)]).expect("unique");

        let previous = list
            .replace(Index::from_zero_based(0), entry("A", 10))
            .expect("same identity replacement");
        assert_eq!(previous, entry("a", 1));

        let err = list
            .replace(Index::from_zero_based(0), entry("b", 3))
            .unwrap_err();
        assert_eq!(err, UniqueListError::Duplicate);
        assert_eq!(list.as_slice(), &[entry("A", 10), entry("b", 2)]);
    }

    #[test]
    fn out_of_range_is_reported_with_length() {
        let mut list = UniqueList::from_vec(vec![entry("a", 1)]).expect("unique");
        let err = list.remove(Index::from_zero_based(1)).unwrap_err();
        assert_eq!(
            err,
            UniqueListError::IndexOutOfRange {
                index: Index::from_zero_based(1),
                len: 1
            }
        );
        assert_eq!(list.len(), 1);
        assert!(list.get(Index::from_zero_based(1)).is_none());
    }

    #[test]
    fn from_vec_rejects_duplicates() {
        let err = UniqueList::from_vec(vec![entry("a", 1), entry("A", 2)]).unwrap_err();
        assert_eq!(err, UniqueListError::Duplicate);
    }
}
