//! Date to/from unsigned 32-bit civil-time conversion.
//!
//! Civil time here is unix time shifted by a fixed +1 h offset (UTC+1,
//! never adjusted for daylight saving). A date maps to the second count of
//! its local noon, so 1970-01-01 maps to 39 600 and zero is unreachable for
//! any valid date.

use crate::date::is_leap;

/// First supported year (unix epoch).
pub const MIN_YEAR: u16 = 1970;

/// Last supported year whose noon still fits into 32 bits with headroom.
pub const MAX_YEAR: u16 = 2105;

/// Seconds per day.
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Seconds from midnight UTC to local noon (12:00 UTC+1 = 11:00 UTC).
pub(crate) const NOON_SECONDS: u32 = 39_600;

/// Fixed civil offset between UTC and local time.
pub(crate) const CIVIL_SHIFT: u32 = 3_600;

/// Number of days in each month (index 0 unused, index 1 = January).
/// February is given for a common year; callers adjust for leap years.
pub(crate) const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days elapsed before each month in a common year (index 0 unused).
pub(crate) const DAYS_BEFORE_MONTH: [u32; 13] = [
    0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334,
];

/// Day numbers (0-based since 1970-01-01) of December 31 of every leap year
/// in the supported range. 2100 is not a leap year, hence the wider gap
/// between the last two entries (2096 to 2104).
#[rustfmt::skip]
pub(crate) const LEAP_YEAR_END_DAYS: [u32; 33] = [
     1095,  2556,  4017,  5478,  6939,  8400,  9861, 11322, 12783, 14244,
    15705, 17166, 18627, 20088, 21549, 23010, 24471, 25932, 27393, 28854,
    30315, 31776, 33237, 34698, 36159, 37620, 39081, 40542, 42003, 43464,
    44925, 46386, 49307,
];

/// Number of days between 1970-01-01 and the given valid date.
pub(crate) fn days_since_epoch(year: u16, month: u8, day: u8) -> u32 {
    let y = year as u32;

    // Leap years strictly before `year`.
    let prev = y - 1;
    let leap_years = (prev - 1968) / 4 - (prev - 1900) / 100 + (prev - 1600) / 400;

    let mut days = (y - 1970) * 365 + leap_years + DAYS_BEFORE_MONTH[month as usize]
        + day as u32
        - 1;
    if month > 2 && is_leap(year) {
        days += 1;
    }
    days
}

/// Civil-noon second count of a valid date.
pub(crate) fn noon_seconds(year: u16, month: u8, day: u8) -> u32 {
    days_since_epoch(year, month, day) * SECONDS_PER_DAY + NOON_SECONDS
}

/// Resolves an arbitrary unix-time value to `(year, month, day)` in civil
/// time. The +1 h shift saturates at `u32::MAX`; seconds past noon of
/// 2105-12-31 resolve to dates of early 2106, which the caller clamps.
pub(crate) fn resolve(unix_time: u32) -> (u16, u8, u8) {
    let civil = unix_time.saturating_add(CIVIL_SHIFT);
    let num_days = civil / SECONDS_PER_DAY;

    // Leap years whose December 31 lies strictly before this day.
    let mut leaps = 0usize;
    while leaps < LEAP_YEAR_END_DAYS.len() && LEAP_YEAR_END_DAYS[leaps] < num_days {
        leaps += 1;
    }

    let mut year = (num_days - leaps as u32) / 365 + 1970;
    if leaps < LEAP_YEAR_END_DAYS.len() && LEAP_YEAR_END_DAYS[leaps] == num_days {
        // December 31 of a leap year belongs to that leap year.
        year -= 1;
    }

    let mut day_of_year = num_days - leaps as u32 - (year - 1970) * 365;

    let mut dpm = DAYS_PER_MONTH;
    if is_leap(year as u16) {
        dpm[2] = 29;
    }

    let mut month = 1usize;
    while dpm[month] as u32 <= day_of_year {
        day_of_year -= dpm[month] as u32;
        month += 1;
    }

    (year as u16, month as u8, day_of_year as u8 + 1)
}
