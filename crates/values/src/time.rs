//! Time-base modes and slot index conversion.
//!
//! A day holds 96 slots at 15-minute resolution. Two slot-numbering
//! conventions exist in the historical data: files whose time stamps label
//! the start of the slot (00:00..23:45) and files whose time stamps label
//! the end of the slot (00:15..24:00). Both map onto slot indices 0..=95.

use crate::number::parse_u32;

/// Number of time slots per day, independent of the time-base mode.
pub const SLOTS_PER_DAY: usize = 96;

/// Returned when a header's numeric time-mode value is neither 0 nor 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid time mode: {0} (must be 0 or 1)")]
pub struct InvalidTimeMode(pub u32);

/// Slot-numbering convention of a day file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeMode {
    /// Time stamps label the slot start: 00:00, 00:15, ..., 23:45.
    SlotStart,
    /// Time stamps label the slot end: 00:15, 00:30, ..., 24:00.
    SlotEnd,
}

impl TimeMode {
    /// Decodes the numeric header value (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTimeMode`] for any other value.
    pub fn from_number(n: u32) -> Result<Self, InvalidTimeMode> {
        match n {
            0 => Ok(Self::SlotStart),
            1 => Ok(Self::SlotEnd),
            other => Err(InvalidTimeMode(other)),
        }
    }

    /// Returns the numeric header value.
    pub fn number(self) -> u32 {
        match self {
            Self::SlotStart => 0,
            Self::SlotEnd => 1,
        }
    }
}

/// Converts a `HH:MM` string to a slot index under the given mode.
///
/// The string must be exactly five characters with a colon in the middle;
/// minutes must be a multiple of 15. Mode [`TimeMode::SlotStart`] accepts
/// 00:00..=23:45, mode [`TimeMode::SlotEnd`] accepts 00:15..=24:00 where
/// the 24 hour is only valid at minute 0.
pub fn parse_slot(mode: TimeMode, s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    let hour = parse_u32(&s[0..2])?;
    let minute = parse_u32(&s[3..5])?;

    if minute > 59 || minute % 15 != 0 {
        return None;
    }

    match mode {
        TimeMode::SlotStart => {
            if hour > 23 {
                return None;
            }
            Some((hour * 4 + minute / 15) as usize)
        }
        TimeMode::SlotEnd => {
            if hour > 24 || (hour == 0 && minute == 0) || (hour == 24 && minute != 0) {
                return None;
            }
            Some((hour * 4 + minute / 15 - 1) as usize)
        }
    }
}

/// Converts a slot index back to its `HH:MM` string, the exact inverse of
/// [`parse_slot`]. The `summer` flag adds one hour for display only.
///
/// Returns `None` when the slot index is out of range.
pub fn format_slot(mode: TimeMode, slot: usize, summer: bool) -> Option<String> {
    if slot >= SLOTS_PER_DAY {
        return None;
    }
    let quarter = match mode {
        TimeMode::SlotStart => slot,
        TimeMode::SlotEnd => slot + 1,
    };
    let mut hour = quarter / 4;
    let minute = (quarter % 4) * 15;
    if summer {
        hour += 1;
    }
    Some(format!("{hour:02}:{minute:02}"))
}
