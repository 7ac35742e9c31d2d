//! Field parsing utilities for MPCORB records
//!
//! This module provides the column slicer and the scalar parsers used by the
//! record assembler, plus the required/optional wrappers that apply the
//! per-field policy from [`super::columns`].

use chrono::NaiveDate;
use std::ops::Range;
use std::str::FromStr;
use tracing::trace;

use super::columns::Field;
use super::error::{DecodeError, ScalarError};
use crate::constants::{MPC_DATE_FORMAT, UNKNOWN_MONTH_DAY, UNKNOWN_MONTH_DAY_SUBSTITUTE};

/// Extract a column from a record line without trimming
///
/// Ranges running past the end of the line are clamped, so a truncated record
/// reads as blank columns.
pub fn raw_field(line: &str, columns: Range<usize>) -> &str {
    let end = columns.end.min(line.len());
    let start = columns.start.min(end);
    line.get(start..end).unwrap_or_default()
}

/// Extract a column from a record line and trim surrounding spaces
///
/// Only the space character is stripped; tabs and other whitespace are kept.
pub fn slice_field(line: &str, columns: Range<usize>) -> &str {
    raw_field(line, columns).trim_matches(' ')
}

fn parse_scalar<T: FromStr>(value: &str) -> Result<T, ScalarError> {
    let trimmed = value.trim_matches(' ');
    if trimmed.is_empty() {
        return Err(ScalarError::Empty);
    }
    trimmed.parse::<T>().map_err(|_| ScalarError::Malformed)
}

/// Parse a decimal float
pub fn parse_float(value: &str) -> Result<f64, ScalarError> {
    parse_scalar(value)
}

/// Parse a base-10 integer
pub fn parse_int(value: &str) -> Result<i64, ScalarError> {
    parse_scalar(value)
}

/// Parse a base-16 integer (sign allowed, no `0x` prefix)
pub fn parse_hex(value: &str) -> Result<i64, ScalarError> {
    let trimmed = value.trim_matches(' ');
    if trimmed.is_empty() {
        return Err(ScalarError::Empty);
    }
    i64::from_str_radix(trimmed, 16).map_err(|_| ScalarError::Malformed)
}

/// Parse a plain `YYYYMMDD` date
///
/// Catalogs often leave month and day unknown as `0000`; those dates are read
/// as the 1st of January of the given year.
pub fn parse_plain_date(value: &str) -> Result<NaiveDate, DecodeError> {
    let trimmed = value.trim_matches(' ');
    let invalid = || DecodeError::InvalidDate {
        field: Field::DateOfLastObservation,
        value: trimmed.to_string(),
    };

    if trimmed.len() != 8 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let normalized = match trimmed.strip_suffix(UNKNOWN_MONTH_DAY) {
        Some(year) => format!("{}{}", year, UNKNOWN_MONTH_DAY_SUBSTITUTE),
        None => trimmed.to_string(),
    };

    NaiveDate::parse_from_str(&normalized, MPC_DATE_FORMAT).map_err(|_| invalid())
}

/// Parse the arc-length form of the conditional column, e.g. `"  6 days"`
pub fn parse_arc_length(value: &str) -> Result<i64, DecodeError> {
    let trimmed = value.trim_matches(' ');
    let Some((days, _unit)) = trimmed.split_once(' ') else {
        return Err(DecodeError::MalformedArcLength {
            value: trimmed.to_string(),
        });
    };

    parse_int(days).map_err(|reason| DecodeError::malformed_number(Field::ArcLength, days, reason))
}

/// Parse a required float column, failing the record on error
pub fn parse_required_float(line: &str, field: Field) -> Result<f64, DecodeError> {
    let value = slice_field(line, field.columns());
    parse_float(value).map_err(|reason| DecodeError::malformed_number(field, value, reason))
}

/// Parse a required integer column, failing the record on error
pub fn parse_required_int(line: &str, field: Field) -> Result<i64, DecodeError> {
    let value = slice_field(line, field.columns());
    parse_int(value).map_err(|reason| DecodeError::malformed_number(field, value, reason))
}

/// Parse a required hexadecimal column, failing the record on error
pub fn parse_required_hex(line: &str, field: Field) -> Result<i64, DecodeError> {
    let value = slice_field(line, field.columns());
    parse_hex(value).map_err(|reason| DecodeError::malformed_number(field, value, reason))
}

/// Parse an optional float column, substituting zero on error
pub fn parse_optional_float(line: &str, field: Field) -> f64 {
    let value = slice_field(line, field.columns());
    parse_float(value).unwrap_or_else(|reason| {
        trace!("Defaulting {} to 0 ('{}': {})", field, value, reason);
        0.0
    })
}

/// Parse an optional integer column, substituting zero on error
pub fn parse_optional_int(line: &str, field: Field) -> i64 {
    let value = slice_field(line, field.columns());
    parse_int(value).unwrap_or_else(|reason| {
        trace!("Defaulting {} to 0 ('{}': {})", field, value, reason);
        0
    })
}

/// Take a text column as-is (trimmed)
pub fn parse_text(line: &str, field: Field) -> String {
    slice_field(line, field.columns()).to_string()
}
