//! Packed integer and packed epoch decoding
//!
//! MPC packs large numbers into narrow columns by letting the leading
//! character range over `0-9A-Za-z` (values 0-61) while every following
//! character is an ordinary decimal digit. `A0001` is therefore 100001 and
//! `J95` is 1995. Packed epochs are three such numbers: a 3-character year, a
//! 1-character month and a 1-character day.

use chrono::{Days, NaiveDate};

use super::columns::Field;
use super::error::DecodeError;
use super::field_parsers::slice_field;
use crate::constants::{PACKED_LOWERCASE_OFFSET, PACKED_UPPERCASE_OFFSET};

/// Value of a packed leading digit, or `None` outside `0-9A-Za-z`
pub fn packed_digit_value(c: u8) -> Option<i64> {
    match c {
        b'0'..=b'9' => Some(i64::from(c - b'0')),
        b'A'..=b'Z' => Some(i64::from(c - b'A') + PACKED_UPPERCASE_OFFSET),
        b'a'..=b'z' => Some(i64::from(c - b'a') + PACKED_LOWERCASE_OFFSET),
        _ => None,
    }
}

/// Decode a packed integer
///
/// The trailing characters are read right to left as decimal digits; anything
/// else (embedded spaces) is skipped without advancing the place value. The
/// first character contributes its packed value at the next place. Blank input
/// decodes to 0. Never fails.
pub fn decode_packed_int(value: &str) -> i64 {
    let bytes = value.trim_matches(' ').as_bytes();
    let Some((&lead, rest)) = bytes.split_first() else {
        return 0;
    };

    let mut result: i64 = 0;
    let mut place: i64 = 1;
    for &c in rest.iter().rev() {
        if c.is_ascii_digit() {
            result = result.saturating_add(i64::from(c - b'0').saturating_mul(place));
            place = place.saturating_mul(10);
        }
    }

    let lead_value = packed_digit_value(lead).unwrap_or(0);
    result.saturating_add(lead_value.saturating_mul(place))
}

/// Build a calendar date, rolling out-of-range months and days over
///
/// Month 13 is January of the next year, day 0 is the last day of the
/// previous month, and so on. `None` only outside chrono's representable range.
pub fn normalized_date(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    let months = year.checked_mul(12)?.checked_add(month.checked_sub(1)?)?;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = u32::try_from(months.rem_euclid(12) + 1).ok()?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;

    let offset = day.checked_sub(1)?;
    if offset >= 0 {
        first.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        first.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}

/// Decode a 5-character packed epoch such as `K13B4` (2013-11-04)
///
/// Every packed value maps to a date; the error only covers dates chrono
/// cannot represent, which a 5-character field cannot produce.
pub fn decode_packed_date(value: &str) -> Result<NaiveDate, DecodeError> {
    let packed = value.trim_matches(' ');
    let year = decode_packed_int(slice_field(packed, 0..3));
    let month = decode_packed_int(slice_field(packed, 3..4));
    let day = decode_packed_int(slice_field(packed, 4..5));

    normalized_date(year, month, day).ok_or_else(|| DecodeError::InvalidDate {
        field: Field::Epoch,
        value: packed.to_string(),
    })
}
