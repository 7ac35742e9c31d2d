//! Packed minor-planet designations
//!
//! The 7-character id column holds one of three encodings:
//!
//! - **Numbered**: a packed integer, `00001` → `1`, `A0001` → `100001`
//! - **Provisional**: packed year, half-month letter, packed cycle count and
//!   order letter, `J95X45A` → `1995 XA45`
//! - **Survey**: two survey code characters, `S`, then a packed sequence
//!   number, `PLS2040` → `2040 P-L`
//!
//! Which one applies is decided by looking at the characters after the first:
//! all digits means numbered, otherwise a digit at position 2 means
//! provisional, and anything else is a survey designation. Resolution never
//! fails; unexpected input still produces some designation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::field_parsers::slice_field;
use super::packed::decode_packed_int;
use crate::constants::{
    PACKED_DIGIT_MAX, PACKED_LOWERCASE_OFFSET, PACKED_UPPERCASE_OFFSET, SURVEY_MARKER,
};

/// A decoded minor-planet designation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Designation {
    /// Permanently numbered object, e.g. `(1) Ceres`
    Numbered { number: i64 },
    /// Provisional designation, e.g. `1995 XA45`
    Provisional {
        year: i64,
        half_month: char,
        order: char,
        cycle: i64,
    },
    /// Palomar-Leiden / Trojan survey designation, e.g. `2040 P-L`
    Survey { number: i64, survey: [char; 2] },
}

impl Designation {
    /// Resolve a packed designation column (untrimmed, normally 7 characters)
    pub fn resolve(field: &str) -> Self {
        let bytes = field.as_bytes();
        let numeric_tail = bytes
            .iter()
            .skip(1)
            .all(|&c| c == b' ' || c.is_ascii_digit());

        if numeric_tail {
            Self::decode_numbered(field)
        } else if char_at(bytes, 2).is_ascii_digit() {
            Self::decode_provisional(field)
        } else {
            Self::decode_survey(field)
        }
    }

    fn decode_numbered(field: &str) -> Self {
        Self::Numbered {
            number: decode_packed_int(field),
        }
    }

    fn decode_provisional(field: &str) -> Self {
        let bytes = field.as_bytes();
        Self::Provisional {
            year: decode_packed_int(slice_field(field, 0..3)),
            half_month: char_at(bytes, 3),
            order: char_at(bytes, 6),
            cycle: decode_packed_int(slice_field(field, 4..6)),
        }
    }

    fn decode_survey(field: &str) -> Self {
        let bytes = field.as_bytes();
        Self::Survey {
            number: decode_packed_int(slice_field(field, 3..7)),
            survey: [char_at(bytes, 0), char_at(bytes, 1)],
        }
    }

    /// Encode back into the packed column form
    ///
    /// Returns `None` when a component does not fit the packed alphabet
    /// (numbers of 620000 and above, years of 6200 and above, cycles of 620
    /// and above, survey numbers of 10000 and above).
    pub fn pack(&self) -> Option<String> {
        match *self {
            Self::Numbered { number } => {
                if number < 0 {
                    return None;
                }
                let lead = packed_char(number / 10_000)?;
                Some(format!("{}{:04}", lead, number % 10_000))
            }
            Self::Provisional {
                year,
                half_month,
                order,
                cycle,
            } => {
                if year < 0 || cycle < 0 {
                    return None;
                }
                let century = packed_char(year / 100)?;
                let cycle_lead = packed_char(cycle / 10)?;
                Some(format!(
                    "{}{:02}{}{}{}{}",
                    century,
                    year % 100,
                    half_month,
                    cycle_lead,
                    cycle % 10,
                    order
                ))
            }
            Self::Survey { number, survey } => {
                if !(0..10_000).contains(&number) {
                    return None;
                }
                Some(format!(
                    "{}{}{}{:04}",
                    survey[0], survey[1], SURVEY_MARKER, number
                ))
            }
        }
    }
}

impl fmt::Display for Designation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numbered { number } => write!(f, "{}", number),
            Self::Provisional {
                year,
                half_month,
                order,
                cycle,
            } => {
                write!(f, "{} {}{}", year, half_month, order)?;
                if *cycle > 0 {
                    write!(f, "{}", cycle)?;
                }
                Ok(())
            }
            Self::Survey { number, survey } => write!(f, "{} {}-{}", number, survey[0], survey[1]),
        }
    }
}

/// Decode a packed designation column straight to its canonical text
pub fn resolve_packed_designation(field: &str) -> String {
    Designation::resolve(field).to_string()
}

/// Byte at `index` as a char; positions past the end read as a space
fn char_at(bytes: &[u8], index: usize) -> char {
    bytes.get(index).map_or(' ', |&b| char::from(b))
}

/// Packed digit for `value` in 0..=61
fn packed_char(value: i64) -> Option<char> {
    let offset = u8::try_from(value).ok()?;
    match value {
        0..=9 => Some(char::from(b'0' + offset)),
        PACKED_UPPERCASE_OFFSET..PACKED_LOWERCASE_OFFSET => {
            Some(char::from(b'A' + offset - PACKED_UPPERCASE_OFFSET as u8))
        }
        PACKED_LOWERCASE_OFFSET..=PACKED_DIGIT_MAX => {
            Some(char::from(b'a' + offset - PACKED_LOWERCASE_OFFSET as u8))
        }
        _ => None,
    }
}
