//! Error types for Structured Field Values parsing and serialization.
//!
//! The two error enums are disjoint by design: [`ParseError`] covers every
//! way an input byte string can fail to be a well-formed field value, and
//! [`SerializeError`] covers every way an in-memory tree can fail to have a
//! wire representation. No operation in this crate returns a partial result
//! alongside an error.
//!
//! Parse errors carry the byte offset at which the grammar was violated:
//!
//! ```rust
//! use structured_fields::{parse_item, ParseError};
//!
//! let err = parse_item(b"?T").unwrap_err();
//! assert_eq!(
//!     err,
//!     ParseError::UnexpectedByte { position: 1, found: b'T', expected: "`0` or `1`" }
//! );
//! ```

use thiserror::Error;

/// An input byte string is not a well-formed instance of the requested
/// top-level type.
///
/// `position` is the zero-based byte offset into the input. It may equal the
/// input length when the input ends while more bytes were required.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input contains a byte outside the ASCII range.
    #[error("input is not ASCII: byte 0x{byte:02x} at position {position}")]
    NonAscii { position: usize, byte: u8 },

    /// A byte did not match what the grammar allows at its position.
    #[error("unexpected byte 0x{found:02x} at position {position}, expected {expected}")]
    UnexpectedByte {
        position: usize,
        found: u8,
        expected: &'static str,
    },

    /// The input ended while the grammar required more bytes.
    #[error("unexpected end of input at position {position}, expected {expected}")]
    UnexpectedEof {
        position: usize,
        expected: &'static str,
    },

    /// An integer literal is longer than 15 digits.
    #[error("integer at position {position} exceeds 15 digits")]
    IntegerTooLong { position: usize },

    /// A decimal literal has more than 12 integer digits or more than 3
    /// fractional digits.
    #[error("decimal at position {position} exceeds 12 integer or 3 fractional digits")]
    DecimalTooLong { position: usize },

    /// The content of a byte sequence could not be decoded as base64.
    #[error("invalid base64 in byte sequence at position {position}")]
    Base64 { position: usize },

    /// Bytes remained after the top-level value was fully parsed.
    #[error("trailing characters at position {position}")]
    TrailingCharacters { position: usize },
}

/// A value tree cannot be serialized.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SerializeError {
    /// The integer's magnitude exceeds 999,999,999,999,999.
    #[error("integer {0} is outside the serializable range of 15 digits")]
    IntegerOutOfRange(i64),

    /// The decimal has more than 12 integer digits after rounding.
    #[error("decimal {0} exceeds 12 integer digits after rounding")]
    DecimalOutOfRange(f64),

    /// The decimal is NaN or infinite.
    #[error("decimal {0} is not finite")]
    NonFiniteDecimal(f64),

    /// A string contains a character outside printable ASCII.
    #[error("string contains unserializable character {0:?}")]
    StringCharacter(char),

    /// A token does not match the token grammar.
    #[error("token {0:?} does not match the token grammar")]
    Token(String),

    /// A parameter or dictionary key does not match the key grammar.
    #[error("key {0:?} does not match the key grammar")]
    Key(String),
}
