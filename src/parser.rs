//! Parsing of field values into the typed tree.
//!
//! A [`Parser`] wraps a single input and is consumed by one of the three
//! entry points, matching the three top-level shapes a field value can
//! have. The caller picks the shape; the field name registry that would
//! map names to shapes is out of scope.
//!
//! ```rust
//! use structured_fields::{BareItem, ListEntry, Parser};
//!
//! let dict = Parser::new(b"u=2, i").unwrap().parse_dictionary().unwrap();
//! match dict.get("u") {
//!     Some(ListEntry::Item(item)) => assert_eq!(item.bare_item, BareItem::Integer(2)),
//!     _ => panic!("expected an item"),
//! }
//! assert_eq!(
//!     dict.get("i").and_then(|e| e.as_item()).map(|i| &i.bare_item),
//!     Some(&BareItem::Boolean(true))
//! );
//! ```
//!
//! Parsing is one-shot: the entry points take `self` because the
//! underlying cursor is single-pass and not restartable.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, Engine, GeneralPurpose, GeneralPurposeConfig};

use crate::error::ParseError;
use crate::parameters::{Dictionary, Parameters};
use crate::scanner::Scanner;
use crate::value::{BareItem, InnerList, Item, List, ListEntry};

/// Decoder for byte sequence content. Padding may be absent or
/// non-canonical and non-zero trailing bits are kept, so `:aGVsbG8:`,
/// `:aGVsbG8=:` and `:iZ==:` all decode.
const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

fn is_key_byte(b: u8) -> bool {
    matches!(b, b'_' | b'-' | b'.' | b'*' | b'0'..=b'9' | b'a'..=b'z')
}

pub(crate) fn is_token_byte(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'#'
            | b'$'
            | b'%'
            | b'&'
            | b'\''
            | b'*'
            | b'+'
            | b'-'
            | b'.'
            | b'/'
            | b'0'..=b'9'
            | b':'
            | b'A'..=b'Z'
            | b'^'
            | b'_'
            | b'`'
            | b'a'..=b'z'
            | b'|'
            | b'~'
    )
}

fn is_literal_string_byte(b: u8) -> bool {
    // VCHAR and SP without `"` and `\`, which must be escaped.
    matches!(b, 0x20..=0x21 | 0x23..=0x5b | 0x5d..=0x7e)
}

fn is_base64_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=')
}

// The scanner admits only ASCII, so every byte maps to one char.
fn ascii_str(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn digits_value(digits: &[u8]) -> i64 {
    digits
        .iter()
        .fold(0i64, |acc, &d| acc * 10 + i64::from(d - b'0'))
}

/// A single-use parser over one field value.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `input`.
    ///
    /// Fails with [`ParseError::NonAscii`] if any byte is outside the
    /// ASCII range.
    pub fn new(input: &'a [u8]) -> Result<Self, ParseError> {
        Ok(Parser {
            scanner: Scanner::new(input)?,
        })
    }

    /// Parses the whole input as a list.
    ///
    /// Empty input is a valid, empty list.
    pub fn parse_list(mut self) -> Result<List, ParseError> {
        self.scanner.skip_sp();
        let mut list = List::new();
        if self.scanner.eof() {
            return Ok(list);
        }
        loop {
            list.push(self.parse_member()?);
            self.scanner.skip_ows();
            if self.scanner.eof() {
                return Ok(list);
            }
            self.expect(b',', "`,` between list members")?;
            self.scanner.skip_ows();
            if self.scanner.eof() {
                return Err(ParseError::UnexpectedEof {
                    position: self.scanner.pos(),
                    expected: "a list member after `,`",
                });
            }
        }
    }

    /// Parses the whole input as a dictionary.
    ///
    /// Empty input is a valid, empty dictionary. When a key occurs more
    /// than once, the last occurrence decides both the value and the
    /// member's position.
    pub fn parse_dictionary(mut self) -> Result<Dictionary, ParseError> {
        self.scanner.skip_sp();
        let mut dict = Dictionary::new();
        if self.scanner.eof() {
            return Ok(dict);
        }
        loop {
            let key = self.parse_key()?;
            let member = if self.scanner.try_consume(b'=') {
                self.parse_member()?
            } else {
                let params = self.parse_parameters()?;
                ListEntry::Item(Item::with_params(BareItem::Boolean(true), params))
            };
            dict.shift_remove(&key);
            dict.insert(key, member);
            self.scanner.skip_ows();
            if self.scanner.eof() {
                return Ok(dict);
            }
            self.expect(b',', "`,` between dictionary members")?;
            self.scanner.skip_ows();
            if self.scanner.eof() {
                return Err(ParseError::UnexpectedEof {
                    position: self.scanner.pos(),
                    expected: "a dictionary member after `,`",
                });
            }
        }
    }

    /// Parses the whole input as a single item.
    ///
    /// Unlike lists and dictionaries, an item cannot be empty.
    pub fn parse_item(mut self) -> Result<Item, ParseError> {
        self.scanner.skip_sp();
        let item = self.parse_parameterized_item()?;
        self.scanner.skip_sp();
        if !self.scanner.eof() {
            return Err(ParseError::TrailingCharacters {
                position: self.scanner.pos(),
            });
        }
        Ok(item)
    }

    fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), ParseError> {
        match self.scanner.peek() {
            Some(found) if found == byte => {
                self.scanner.advance();
                Ok(())
            }
            Some(found) => Err(ParseError::UnexpectedByte {
                position: self.scanner.pos(),
                found,
                expected,
            }),
            None => Err(ParseError::UnexpectedEof {
                position: self.scanner.pos(),
                expected,
            }),
        }
    }

    fn parse_member(&mut self) -> Result<ListEntry, ParseError> {
        if self.scanner.peek() == Some(b'(') {
            Ok(ListEntry::InnerList(self.parse_inner_list()?))
        } else {
            Ok(ListEntry::Item(self.parse_parameterized_item()?))
        }
    }

    fn parse_inner_list(&mut self) -> Result<InnerList, ParseError> {
        self.expect(b'(', "`(`")?;
        let mut items = Vec::new();
        loop {
            self.scanner.skip_sp();
            if self.scanner.try_consume(b')') {
                break;
            }
            items.push(self.parse_parameterized_item()?);
            match self.scanner.peek() {
                Some(b' ') | Some(b')') => (),
                Some(found) => {
                    return Err(ParseError::UnexpectedByte {
                        position: self.scanner.pos(),
                        found,
                        expected: "SP or `)` after an inner list item",
                    })
                }
                None => {
                    return Err(ParseError::UnexpectedEof {
                        position: self.scanner.pos(),
                        expected: "SP or `)` after an inner list item",
                    })
                }
            }
        }
        let params = self.parse_parameters()?;
        Ok(InnerList::with_params(items, params))
    }

    fn parse_parameterized_item(&mut self) -> Result<Item, ParseError> {
        let bare_item = self.parse_bare_item()?;
        let params = self.parse_parameters()?;
        Ok(Item::with_params(bare_item, params))
    }

    fn parse_parameters(&mut self) -> Result<Parameters, ParseError> {
        let mut params = Parameters::new();
        while self.scanner.try_consume(b';') {
            self.scanner.skip_sp();
            let key = self.parse_key()?;
            let value = if self.scanner.try_consume(b'=') {
                self.parse_bare_item()?
            } else {
                BareItem::Boolean(true)
            };
            params.insert(key, value);
        }
        Ok(params)
    }

    fn parse_key(&mut self) -> Result<String, ParseError> {
        match self.scanner.peek() {
            Some(b'a'..=b'z') | Some(b'*') => (),
            Some(found) => {
                return Err(ParseError::UnexpectedByte {
                    position: self.scanner.pos(),
                    found,
                    expected: "a key",
                })
            }
            None => {
                return Err(ParseError::UnexpectedEof {
                    position: self.scanner.pos(),
                    expected: "a key",
                })
            }
        }
        let bytes = self.scanner.take_while(is_key_byte);
        Ok(ascii_str(bytes))
    }

    fn parse_bare_item(&mut self) -> Result<BareItem, ParseError> {
        match self.scanner.peek() {
            Some(b'-') | Some(b'0'..=b'9') => self.parse_number(),
            Some(b'"') => self.parse_string(),
            Some(b'a'..=b'z') | Some(b'A'..=b'Z') | Some(b'*') => self.parse_token(),
            Some(b':') => self.parse_byte_sequence(),
            Some(b'?') => self.parse_boolean(),
            Some(found) => Err(ParseError::UnexpectedByte {
                position: self.scanner.pos(),
                found,
                expected: "a bare item",
            }),
            None => Err(ParseError::UnexpectedEof {
                position: self.scanner.pos(),
                expected: "a bare item",
            }),
        }
    }

    fn parse_number(&mut self) -> Result<BareItem, ParseError> {
        let start = self.scanner.pos();
        let negative = self.scanner.try_consume(b'-');
        let int_digits = self.scanner.take_while(|b| b.is_ascii_digit());
        if int_digits.is_empty() {
            return match self.scanner.peek() {
                Some(found) => Err(ParseError::UnexpectedByte {
                    position: self.scanner.pos(),
                    found,
                    expected: "a digit",
                }),
                None => Err(ParseError::UnexpectedEof {
                    position: self.scanner.pos(),
                    expected: "a digit",
                }),
            };
        }
        if !self.scanner.try_consume(b'.') {
            if int_digits.len() > 15 {
                return Err(ParseError::IntegerTooLong { position: start });
            }
            let value = digits_value(int_digits);
            return Ok(BareItem::Integer(if negative { -value } else { value }));
        }
        if int_digits.len() > 12 {
            return Err(ParseError::DecimalTooLong { position: start });
        }
        let frac_digits = self.scanner.take_while(|b| b.is_ascii_digit());
        if frac_digits.is_empty() {
            return match self.scanner.peek() {
                Some(found) => Err(ParseError::UnexpectedByte {
                    position: self.scanner.pos(),
                    found,
                    expected: "a digit after `.`",
                }),
                None => Err(ParseError::UnexpectedEof {
                    position: self.scanner.pos(),
                    expected: "a digit after `.`",
                }),
            };
        }
        if frac_digits.len() > 3 {
            return Err(ParseError::DecimalTooLong { position: start });
        }
        // At most 15 significant digits, exact both in i64 and in f64.
        let numer =
            digits_value(int_digits) * 10i64.pow(frac_digits.len() as u32) + digits_value(frac_digits);
        let magnitude = numer as f64 / 10f64.powi(frac_digits.len() as i32);
        Ok(BareItem::Decimal(if negative { -magnitude } else { magnitude }))
    }

    fn parse_string(&mut self) -> Result<BareItem, ParseError> {
        self.expect(b'"', "`\"`")?;
        let mut value = String::new();
        loop {
            let run = self.scanner.take_while(is_literal_string_byte);
            value.extend(run.iter().map(|&b| char::from(b)));
            match self.scanner.peek() {
                Some(b'"') => {
                    self.scanner.advance();
                    return Ok(BareItem::String(value));
                }
                Some(b'\\') => {
                    self.scanner.advance();
                    let position = self.scanner.pos();
                    match self.scanner.next_byte("`\"` or `\\` after `\\`")? {
                        escaped @ (b'"' | b'\\') => value.push(char::from(escaped)),
                        found => {
                            return Err(ParseError::UnexpectedByte {
                                position,
                                found,
                                expected: "`\"` or `\\` after `\\`",
                            })
                        }
                    }
                }
                Some(found) => {
                    return Err(ParseError::UnexpectedByte {
                        position: self.scanner.pos(),
                        found,
                        expected: "a printable character, `\"`, or `\\`",
                    })
                }
                None => {
                    return Err(ParseError::UnexpectedEof {
                        position: self.scanner.pos(),
                        expected: "closing `\"`",
                    })
                }
            }
        }
    }

    fn parse_token(&mut self) -> Result<BareItem, ParseError> {
        // The dispatch in parse_bare_item guarantees the first byte is
        // ALPHA or `*`, both inside the token class.
        let bytes = self.scanner.take_while(is_token_byte);
        Ok(BareItem::Token(ascii_str(bytes)))
    }

    fn parse_byte_sequence(&mut self) -> Result<BareItem, ParseError> {
        self.expect(b':', "`:`")?;
        let start = self.scanner.pos();
        let encoded = self.scanner.take_while(is_base64_byte);
        self.expect(b':', "closing `:`")?;
        let bytes = BASE64_LENIENT
            .decode(encoded)
            .map_err(|_| ParseError::Base64 { position: start })?;
        Ok(BareItem::ByteSequence(bytes))
    }

    fn parse_boolean(&mut self) -> Result<BareItem, ParseError> {
        self.expect(b'?', "`?`")?;
        match self.scanner.peek() {
            Some(b'0') => {
                self.scanner.advance();
                Ok(BareItem::Boolean(false))
            }
            Some(b'1') => {
                self.scanner.advance();
                Ok(BareItem::Boolean(true))
            }
            Some(found) => Err(ParseError::UnexpectedByte {
                position: self.scanner.pos(),
                found,
                expected: "`0` or `1`",
            }),
            None => Err(ParseError::UnexpectedEof {
                position: self.scanner.pos(),
                expected: "`0` or `1`",
            }),
        }
    }
}
