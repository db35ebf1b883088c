//! # structured-fields
//!
//! A parser and serializer for HTTP Structured Field Values, the header
//! value syntax defined by [RFC 8941](https://www.rfc-editor.org/rfc/rfc8941).
//!
//! Structured fields give header values a typed shape instead of ad-hoc
//! string conventions: a field is a list, a dictionary, or a single item,
//! built out of integers, decimals, strings, tokens, byte sequences and
//! booleans, each optionally carrying parameters. This crate converts
//! between the wire bytes and a typed tree, in both directions, with the
//! grammar enforced exactly: what parses is well-formed, and what
//! serializes re-parses to an equal tree.
//!
//! ## Parsing
//!
//! The caller chooses the top-level shape; the field's definition says
//! which one applies. For example `Priority: u=2, i` is a dictionary:
//!
//! ```rust
//! use structured_fields::parse_dictionary;
//!
//! let priority = parse_dictionary(b"u=2, i").unwrap();
//!
//! let urgency = priority
//!     .get("u")
//!     .and_then(|member| member.as_item())
//!     .and_then(|item| item.bare_item.as_integer());
//! assert_eq!(urgency, Some(2));
//!
//! let incremental = priority
//!     .get("i")
//!     .and_then(|member| member.as_item())
//!     .and_then(|item| item.bare_item.as_boolean());
//! assert_eq!(incremental, Some(true));
//! ```
//!
//! Lists and single items work the same way:
//!
//! ```rust
//! use structured_fields::{parse_item, parse_list, BareItem};
//!
//! let list = parse_list(b"sugar, tea, rum").unwrap();
//! assert_eq!(list.len(), 3);
//!
//! let item = parse_item(b"2; foourl=\"https://foo.example.com/\"").unwrap();
//! assert_eq!(item.bare_item, BareItem::Integer(2));
//! assert_eq!(
//!     item.params.get("foourl").and_then(|v| v.as_str()),
//!     Some("https://foo.example.com/")
//! );
//! ```
//!
//! Anything outside the grammar is rejected with a
//! [`ParseError`] naming the offending byte position. There is no partial
//! result and no recovery.
//!
//! ## Serializing
//!
//! [`to_string`] accepts any top-level shape, or a bare item, which is
//! serialized as an item without parameters:
//!
//! ```rust
//! use structured_fields::{dictionary, params, to_string, BareItem, Item};
//!
//! let dict = dictionary! {
//!     "a" => BareItem::Boolean(false),
//!     "b" => Item::with_params(BareItem::Integer(9), params! { "q" => 0.5 }),
//! };
//! assert_eq!(to_string(&dict).unwrap(), "a=?0, b=9;q=0.5");
//! ```
//!
//! The serializer validates as it goes: integers beyond 15 digits,
//! decimals with more than 12 integer digits, malformed tokens or keys,
//! and strings with characters outside printable ASCII all fail with a
//! [`SerializeError`] rather than producing almost-right output.
//!
//! ## Scope
//!
//! This crate deals in field *values* only. Fetching headers, picking the
//! right top-level type for a given field name, and validating parsed
//! values against an application schema are all the caller's business.

pub mod error;
pub mod macros;
pub mod parameters;
pub mod parser;
pub mod ser;
pub mod value;

mod scanner;

pub use error::{ParseError, SerializeError};
pub use parameters::{Dictionary, Parameters};
pub use parser::Parser;
pub use ser::{Serialize, Serializer};
pub use value::{BareItem, InnerList, Item, List, ListEntry};

/// Parses `input` as a list.
///
/// Empty input yields an empty list.
///
/// # Errors
///
/// Returns a [`ParseError`] if `input` is not a well-formed list.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_list(input: &[u8]) -> Result<List, ParseError> {
    Parser::new(input)?.parse_list()
}

/// Parses `input` as a dictionary.
///
/// Empty input yields an empty dictionary. Duplicate keys keep the last
/// occurrence, in the position of the last occurrence.
///
/// # Errors
///
/// Returns a [`ParseError`] if `input` is not a well-formed dictionary.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_dictionary(input: &[u8]) -> Result<Dictionary, ParseError> {
    Parser::new(input)?.parse_dictionary()
}

/// Parses `input` as a single item.
///
/// # Errors
///
/// Returns a [`ParseError`] if `input` is not a well-formed item; unlike
/// the other shapes, empty input is an error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_item(input: &[u8]) -> Result<Item, ParseError> {
    Parser::new(input)?.parse_item()
}

/// Serializes a value into its wire form.
///
/// Accepts a [`List`], a [`Dictionary`], an [`Item`], or a bare
/// [`BareItem`] (serialized as an item with no parameters). The output is
/// always ASCII.
///
/// # Errors
///
/// Returns a [`SerializeError`] if the value has no wire representation.
/// Nothing of the output is observable on failure.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String, SerializeError>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new();
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}
