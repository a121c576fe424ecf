//! Temperature codec.
//!
//! On-disk shape is `[-]D{1,3}.D`: one to three integer digits, a decimal
//! point and exactly one fractional digit, covering -99.9 to 999.9 degrees.
//! The internal unit is tenths of a degree.

use crate::Width;

/// Lowest encodable value in tenths (-99.9 degrees).
pub(crate) const MIN_TENTHS: i32 = -999;

/// Highest encodable value in tenths (999.9 degrees).
pub(crate) const MAX_TENTHS: i32 = 9999;

/// Decodes a temperature string into tenths of a degree.
///
/// Rejects any shape other than `[-]D{1,3}.D` and any value outside
/// -99.9..=999.9.
pub fn parse_temperature(s: &str) -> Option<i32> {
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let (int_part, frac_part) = rest.split_once('.')?;
    if !(1..=3).contains(&int_part.len())
        || frac_part.len() != 1
        || !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    // At most four digits total, cannot overflow i32.
    let magnitude: i32 = int_part.parse::<i32>().ok()? * 10 + frac_part.parse::<i32>().ok()?;
    let tenths = if negative { -magnitude } else { magnitude };

    if !(MIN_TENTHS..=MAX_TENTHS).contains(&tenths) {
        return None;
    }
    Some(tenths)
}

/// Encodes tenths of a degree as a temperature string.
///
/// [`Width::Variable`] emits the minimal form (3 to 5 characters),
/// [`Width::Fixed`] pads to five characters with leading spaces.
///
/// Returns `None` when the value is outside -999..=9999 tenths.
pub fn format_temperature(width: Width, tenths: i32) -> Option<String> {
    if !(MIN_TENTHS..=MAX_TENTHS).contains(&tenths) {
        return None;
    }
    let sign = if tenths < 0 { "-" } else { "" };
    let magnitude = tenths.abs();
    let s = format!("{sign}{}.{}", magnitude / 10, magnitude % 10);
    Some(match width {
        Width::Variable => s,
        Width::Fixed => format!("{s:>5}"),
    })
}
