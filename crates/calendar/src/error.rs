//! Error types for the aeolus-calendar crate.

/// Error type for all fallible operations in the aeolus-calendar crate.
///
/// This enum covers validation failures for year, month and day values,
/// date-string parsing, and day arithmetic that would leave the supported
/// 1970..=2105 range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a year is outside the supported range 1970..=2105.
    #[error("invalid year: {year} (must be 1970..=2105)")]
    InvalidYear {
        /// The invalid year that was provided.
        year: u16,
    },

    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a day number exceeds the number of days in the given
    /// month of the given year.
    #[error("invalid day: {day} for month {month} (max {max_day})")]
    InvalidDay {
        /// The invalid day number that was provided.
        day: u8,
        /// The month for which the day is invalid.
        month: u8,
        /// The maximum valid day for the given month and year.
        max_day: u8,
    },

    /// Returned when a date string does not match the `d.m.yyyy` shape.
    #[error("unparseable date: '{input}' (expected d.m.yyyy)")]
    UnparseableDate {
        /// The string that could not be parsed.
        input: String,
    },

    /// Returned when incrementing or decrementing a date would leave the
    /// supported range.
    #[error("date arithmetic out of range at {date}")]
    OutOfRange {
        /// The boundary date at which the operation failed.
        date: String,
    },
}
