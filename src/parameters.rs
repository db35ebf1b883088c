//! Insertion-ordered maps for parameters and dictionaries.
//!
//! Both maps are thin wrappers around [`IndexMap`]. Order matters on the
//! wire: RFC 8941 field values are serialized member by member in the order
//! the members were inserted, and a receiver that re-serializes a parsed
//! value must not reorder it.
//!
//! ```rust
//! use structured_fields::{BareItem, Parameters};
//!
//! let mut params = Parameters::new();
//! params.insert("q".to_string(), BareItem::from(0.5));
//! params.insert("v".to_string(), BareItem::token("abc"));
//!
//! let keys: Vec<_> = params.keys().cloned().collect();
//! assert_eq!(keys, vec!["q", "v"]);
//! ```

use indexmap::IndexMap;

use crate::value::{BareItem, ListEntry};

/// An ordered map of parameter keys to bare items, attached to an item or
/// an inner list.
///
/// `insert` follows [`IndexMap`] semantics: writing an existing key replaces
/// the value and keeps the key's original position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parameters(IndexMap<String, BareItem>);

impl Parameters {
    /// Creates an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Parameters(IndexMap::new())
    }

    /// Creates an empty parameter map with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Parameters(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous value for the key
    /// if there was one.
    pub fn insert(&mut self, key: String, value: BareItem) -> Option<BareItem> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&BareItem> {
        self.0.get(key)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, BareItem> {
        self.0.keys()
    }

    /// Returns an iterator over the key-value pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, BareItem> {
        self.0.iter()
    }
}

impl IntoIterator for Parameters {
    type Item = (String, BareItem);
    type IntoIter = indexmap::map::IntoIter<String, BareItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a String, &'a BareItem);
    type IntoIter = indexmap::map::Iter<'a, String, BareItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, BareItem)> for Parameters {
    fn from_iter<T: IntoIterator<Item = (String, BareItem)>>(iter: T) -> Self {
        Parameters(IndexMap::from_iter(iter))
    }
}

/// A top-level ordered map from keys to items or inner lists.
///
/// `insert` keeps an existing key's position, like [`IndexMap`]. The parser
/// applies its own duplicate-key rule (the last occurrence determines both
/// value and position) with [`Dictionary::shift_remove`] before re-inserting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dictionary(IndexMap<String, ListEntry>);

impl Dictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Dictionary(IndexMap::new())
    }

    /// Inserts a key-entry pair, returning the previous entry for the key
    /// if there was one.
    pub fn insert(&mut self, key: String, entry: ListEntry) -> Option<ListEntry> {
        self.0.insert(key, entry)
    }

    /// Removes the entry for `key`, shifting later entries down to close
    /// the gap.
    pub fn shift_remove(&mut self, key: &str) -> Option<ListEntry> {
        self.0.shift_remove(key)
    }

    /// Returns a reference to the entry for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ListEntry> {
        self.0.get(key)
    }

    /// Returns `true` if the dictionary contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the dictionary has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, ListEntry> {
        self.0.keys()
    }

    /// Returns an iterator over the key-entry pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, ListEntry> {
        self.0.iter()
    }
}

impl IntoIterator for Dictionary {
    type Item = (String, ListEntry);
    type IntoIter = indexmap::map::IntoIter<String, ListEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a String, &'a ListEntry);
    type IntoIter = indexmap::map::Iter<'a, String, ListEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, ListEntry)> for Dictionary {
    fn from_iter<T: IntoIterator<Item = (String, ListEntry)>>(iter: T) -> Self {
        Dictionary(IndexMap::from_iter(iter))
    }
}
