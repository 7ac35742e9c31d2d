//! Decode failures for a single MPCORB record
//!
//! Every failure names the column that could not be decoded and carries the
//! raw (trimmed) text found there, so a caller can report exactly which part
//! of which line was wrong.

use std::ops::Range;
use thiserror::Error;

use super::columns::Field;

/// Why a scalar field could not be parsed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarError {
    #[error("field is blank")]
    Empty,
    #[error("field is not a valid number")]
    Malformed,
}

/// Failure to decode one record line
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// A required float/int/hex column was blank or not numeric
    #[error("missing or malformed number in {field} (columns {}-{}): '{value}' ({reason})", .columns.start, .columns.end)]
    MissingOrMalformedNumber {
        field: Field,
        columns: Range<usize>,
        value: String,
        reason: ScalarError,
    },

    /// The arc-length column had no space-delimited unit after the day count
    #[error("arc length didn't have enough parts: '{value}'")]
    MalformedArcLength { value: String },

    /// A date column did not form a valid calendar date
    #[error("invalid date in {field}: '{value}'")]
    InvalidDate { field: Field, value: String },
}

impl DecodeError {
    /// Build a number failure for `field`, using its column range from the table
    pub fn malformed_number(field: Field, value: impl Into<String>, reason: ScalarError) -> Self {
        Self::MissingOrMalformedNumber {
            field,
            columns: field.columns(),
            value: value.into(),
            reason,
        }
    }

    /// Field that failed to decode
    pub fn field(&self) -> Field {
        match self {
            Self::MissingOrMalformedNumber { field, .. } | Self::InvalidDate { field, .. } => *field,
            Self::MalformedArcLength { .. } => Field::ArcLength,
        }
    }

    /// Raw text that was rejected
    pub fn value(&self) -> &str {
        match self {
            Self::MissingOrMalformedNumber { value, .. }
            | Self::MalformedArcLength { value }
            | Self::InvalidDate { value, .. } => value,
        }
    }
}
