//! The typed value tree shared by the parser and the serializer.
//!
//! A field value is one of three top-level shapes: a [`List`] of members, a
//! [`Dictionary`](crate::Dictionary) of keyed members, or a single [`Item`].
//! Every member is a
//! bare value plus its parameters; a member of a list or dictionary may also
//! be an [`InnerList`] of items. Inner lists do not nest.
//!
//! ## Creating values
//!
//! ```rust
//! use structured_fields::{BareItem, InnerList, Item};
//!
//! // From primitives
//! let integer = BareItem::from(42);
//! let decimal = BareItem::from(1.5);
//! let text = BareItem::from("hello");
//! let token = BareItem::token("w3c");
//! let blob = BareItem::from(b"binary".to_vec());
//!
//! // Wrap into members
//! let item = Item::new(integer);
//! let inner = InnerList::new(vec![Item::new(BareItem::from(1)), Item::new(BareItem::from(2))]);
//! ```
//!
//! ## Inspecting values
//!
//! ```rust
//! use structured_fields::BareItem;
//!
//! let value = BareItem::from(42);
//! assert!(value.is_integer());
//! assert_eq!(value.as_integer(), Some(42));
//! assert_eq!(value.as_str(), None);
//! ```
//!
//! [`BareItem::String`] and [`BareItem::Token`] both carry text and
//! [`BareItem::String`] and [`BareItem::ByteSequence`] can carry the same
//! bytes, but the variants are distinct: they parse from and serialize to
//! different wire forms.

use crate::parameters::Parameters;

/// A single atomic value, without parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum BareItem {
    /// A signed integer with at most 15 digits.
    Integer(i64),
    /// A signed decimal with at most 12 integer digits and 3 fractional
    /// digits after rounding.
    Decimal(f64),
    /// Printable-ASCII text, serialized in double quotes.
    String(String),
    /// A symbolic identifier, serialized without quotes.
    Token(String),
    /// An opaque byte string, serialized as base64 between colons.
    ByteSequence(Vec<u8>),
    /// A boolean, serialized as `?1` or `?0`.
    Boolean(bool),
}

impl BareItem {
    /// Creates a token value.
    ///
    /// The token grammar is not checked here; serialization fails if the
    /// text does not start with a letter or `*` or contains a byte outside
    /// the token character set.
    ///
    /// ```rust
    /// use structured_fields::BareItem;
    ///
    /// let token = BareItem::token("text/html");
    /// assert!(token.is_token());
    /// ```
    pub fn token<T: Into<String>>(value: T) -> Self {
        BareItem::Token(value.into())
    }

    /// Returns `true` if this is an integer.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, BareItem::Integer(_))
    }

    /// Returns `true` if this is a decimal.
    #[inline]
    #[must_use]
    pub const fn is_decimal(&self) -> bool {
        matches!(self, BareItem::Decimal(_))
    }

    /// Returns `true` if this is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, BareItem::String(_))
    }

    /// Returns `true` if this is a token.
    #[inline]
    #[must_use]
    pub const fn is_token(&self) -> bool {
        matches!(self, BareItem::Token(_))
    }

    /// Returns `true` if this is a byte sequence.
    #[inline]
    #[must_use]
    pub const fn is_byte_sequence(&self) -> bool {
        matches!(self, BareItem::ByteSequence(_))
    }

    /// Returns `true` if this is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, BareItem::Boolean(_))
    }

    /// If this is an integer, returns it.
    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            BareItem::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// If this is a decimal, returns it.
    #[inline]
    #[must_use]
    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            BareItem::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    /// If this is a string, returns its text.
    ///
    /// Tokens are not strings; see [`BareItem::as_token`].
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BareItem::String(v) => Some(v),
            _ => None,
        }
    }

    /// If this is a token, returns its text.
    #[inline]
    #[must_use]
    pub fn as_token(&self) -> Option<&str> {
        match self {
            BareItem::Token(v) => Some(v),
            _ => None,
        }
    }

    /// If this is a byte sequence, returns its bytes.
    #[inline]
    #[must_use]
    pub fn as_byte_sequence(&self) -> Option<&[u8]> {
        match self {
            BareItem::ByteSequence(v) => Some(v),
            _ => None,
        }
    }

    /// If this is a boolean, returns it.
    #[inline]
    #[must_use]
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            BareItem::Boolean(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<i8> for BareItem {
    fn from(value: i8) -> Self {
        BareItem::Integer(value as i64)
    }
}

impl From<i16> for BareItem {
    fn from(value: i16) -> Self {
        BareItem::Integer(value as i64)
    }
}

impl From<i32> for BareItem {
    fn from(value: i32) -> Self {
        BareItem::Integer(value as i64)
    }
}

impl From<i64> for BareItem {
    fn from(value: i64) -> Self {
        BareItem::Integer(value)
    }
}

impl From<u8> for BareItem {
    fn from(value: u8) -> Self {
        BareItem::Integer(value as i64)
    }
}

impl From<u16> for BareItem {
    fn from(value: u16) -> Self {
        BareItem::Integer(value as i64)
    }
}

impl From<u32> for BareItem {
    fn from(value: u32) -> Self {
        BareItem::Integer(value as i64)
    }
}

impl From<f32> for BareItem {
    fn from(value: f32) -> Self {
        BareItem::Decimal(value as f64)
    }
}

impl From<f64> for BareItem {
    fn from(value: f64) -> Self {
        BareItem::Decimal(value)
    }
}

impl From<bool> for BareItem {
    fn from(value: bool) -> Self {
        BareItem::Boolean(value)
    }
}

impl From<String> for BareItem {
    fn from(value: String) -> Self {
        BareItem::String(value)
    }
}

impl From<&str> for BareItem {
    fn from(value: &str) -> Self {
        BareItem::String(value.to_string())
    }
}

impl From<Vec<u8>> for BareItem {
    fn from(value: Vec<u8>) -> Self {
        BareItem::ByteSequence(value)
    }
}

/// A bare item together with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub bare_item: BareItem,
    pub params: Parameters,
}

impl Item {
    /// Creates an item with no parameters.
    ///
    /// ```rust
    /// use structured_fields::{BareItem, Item};
    ///
    /// let item = Item::new(BareItem::from(2));
    /// assert!(item.params.is_empty());
    /// ```
    #[must_use]
    pub fn new(bare_item: BareItem) -> Self {
        Item {
            bare_item,
            params: Parameters::new(),
        }
    }

    /// Creates an item with the given parameters.
    #[must_use]
    pub fn with_params(bare_item: BareItem, params: Parameters) -> Self {
        Item { bare_item, params }
    }
}

impl From<BareItem> for Item {
    fn from(bare_item: BareItem) -> Self {
        Item::new(bare_item)
    }
}

/// A parenthesized sequence of items, with its own trailing parameters.
///
/// Inner lists appear as members of lists and dictionaries; they cannot
/// contain further inner lists.
#[derive(Debug, Clone, PartialEq)]
pub struct InnerList {
    pub items: Vec<Item>,
    pub params: Parameters,
}

impl InnerList {
    /// Creates an inner list with no parameters.
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        InnerList {
            items,
            params: Parameters::new(),
        }
    }

    /// Creates an inner list with the given parameters.
    #[must_use]
    pub fn with_params(items: Vec<Item>, params: Parameters) -> Self {
        InnerList { items, params }
    }
}

/// A member of a [`List`] or a [`Dictionary`](crate::Dictionary): an item
/// or an inner list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEntry {
    Item(Item),
    InnerList(InnerList),
}

impl ListEntry {
    /// If this member is an item, returns it.
    #[inline]
    #[must_use]
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            ListEntry::Item(item) => Some(item),
            _ => None,
        }
    }

    /// If this member is an inner list, returns it.
    #[inline]
    #[must_use]
    pub fn as_inner_list(&self) -> Option<&InnerList> {
        match self {
            ListEntry::InnerList(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<Item> for ListEntry {
    fn from(item: Item) -> Self {
        ListEntry::Item(item)
    }
}

impl From<InnerList> for ListEntry {
    fn from(inner: InnerList) -> Self {
        ListEntry::InnerList(inner)
    }
}

impl From<BareItem> for ListEntry {
    fn from(bare_item: BareItem) -> Self {
        ListEntry::Item(Item::new(bare_item))
    }
}

/// A top-level comma-separated sequence of members.
pub type List = Vec<ListEntry>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_primitives() {
        assert_eq!(BareItem::from(42i32), BareItem::Integer(42));
        assert_eq!(BareItem::from(42i64), BareItem::Integer(42));
        assert_eq!(BareItem::from(7u16), BareItem::Integer(7));
        assert_eq!(BareItem::from(1.5f64), BareItem::Decimal(1.5));
        assert_eq!(BareItem::from(true), BareItem::Boolean(true));
        assert_eq!(BareItem::from("hi"), BareItem::String("hi".to_string()));
        assert_eq!(
            BareItem::from(vec![1u8, 2]),
            BareItem::ByteSequence(vec![1, 2])
        );
    }

    #[test]
    fn token_and_string_are_distinct() {
        let token = BareItem::token("abc");
        let string = BareItem::from("abc");
        assert_ne!(token, string);
        assert_eq!(token.as_token(), Some("abc"));
        assert_eq!(token.as_str(), None);
        assert_eq!(string.as_str(), Some("abc"));
        assert_eq!(string.as_token(), None);
    }

    #[test]
    fn byte_sequence_and_string_are_distinct() {
        let bytes = BareItem::from(b"abc".to_vec());
        let string = BareItem::from("abc");
        assert_ne!(bytes, string);
        assert_eq!(bytes.as_byte_sequence(), Some(&b"abc"[..]));
        assert_eq!(bytes.as_str(), None);
    }

    #[test]
    fn accessors() {
        let value = BareItem::Integer(9);
        assert!(value.is_integer());
        assert!(!value.is_decimal());
        assert_eq!(value.as_integer(), Some(9));
        assert_eq!(value.as_boolean(), None);

        let value = BareItem::Decimal(0.25);
        assert!(value.is_decimal());
        assert_eq!(value.as_decimal(), Some(0.25));
    }

    #[test]
    fn list_entry_accessors() {
        let entry = ListEntry::from(Item::new(BareItem::Integer(1)));
        assert!(entry.as_item().is_some());
        assert!(entry.as_inner_list().is_none());

        let entry = ListEntry::from(InnerList::new(vec![]));
        assert!(entry.as_inner_list().is_some());
        assert!(entry.as_item().is_none());
    }
}
