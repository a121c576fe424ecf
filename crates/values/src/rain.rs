//! Rainfall codec with legacy-format detection.
//!
//! The canonical on-disk shape is `D{1,2}.DD` (hundredths of a millimetre).
//! Historical files carry `D{1,2}.D` (tenths); the two shapes are told
//! apart purely by the decimal-point position, and legacy values are
//! rescaled by 5/4 to align the old sensor calibration with the current
//! unit.

use crate::Width;

/// Highest encodable value in hundredths (9999.99 mm).
pub(crate) const MAX_HUNDREDTHS: u32 = 999_999;

/// Highest value the fixed five-character encoding can carry (99.99 mm).
pub(crate) const MAX_FIXED_HUNDREDTHS: u32 = 9_999;

/// Splits a fraction shape `<int>.<frac>` with the given fractional width
/// and 1..=2 integer digits, returning the combined scaled integer.
fn parse_fixed_point(s: &str, frac_len: usize) -> Option<u32> {
    let (int_part, frac_part) = s.split_once('.')?;
    if !(1..=2).contains(&int_part.len())
        || frac_part.len() != frac_len
        || !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let scale = 10u32.pow(frac_len as u32);
    Some(int_part.parse::<u32>().ok()? * scale + frac_part.parse::<u32>().ok()?)
}

/// Decodes a rain string into hundredths of a millimetre.
///
/// Tries the canonical `D{1,2}.DD` shape first (0.00..=99.99). Failing
/// that, the legacy `D{1,2}.D` tenths shape is accepted and rescaled by
/// 5/4, so `"12.4"` decodes to 155.
pub fn parse_rain(s: &str) -> Option<u32> {
    if let Some(hundredths) = parse_fixed_point(s, 2) {
        return Some(hundredths);
    }
    // Legacy tenths form, recalibrated.
    let tenths = parse_fixed_point(s, 1)?;
    Some(tenths * 5 / 4)
}

/// Encodes hundredths of a millimetre as a rain string.
///
/// [`Width::Variable`] emits the minimal form (4 to 7 characters, up to
/// 9999.99), [`Width::Fixed`] pads to five characters with leading spaces
/// and only carries values up to 99.99.
///
/// Returns `None` when the value does not fit the requested width.
pub fn format_rain(width: Width, hundredths: u32) -> Option<String> {
    match width {
        Width::Variable => {
            if hundredths > MAX_HUNDREDTHS {
                return None;
            }
            Some(format!("{}.{:02}", hundredths / 100, hundredths % 100))
        }
        Width::Fixed => {
            if hundredths > MAX_FIXED_HUNDREDTHS {
                return None;
            }
            Some(format!(
                "{:>5}",
                format!("{}.{:02}", hundredths / 100, hundredths % 100)
            ))
        }
    }
}
