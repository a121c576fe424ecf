//! Error types for the aeolus-dayfile crate.

use std::path::PathBuf;

use aeolus_values::InvalidTimeMode;

/// Error type for reading, validating and writing single day files.
///
/// Every variant corresponds to one failure class of the line-oriented
/// format; [`DayfileError::code`] exposes the historical numeric code that
/// the original tooling printed, preserved for log and report parity.
#[derive(Debug, thiserror::Error)]
pub enum DayfileError {
    /// Returned when the file cannot be opened or created.
    #[error("cannot open file: {}", path.display())]
    Open {
        /// Path that could not be opened.
        path: PathBuf,
    },

    /// Wraps an I/O failure while reading from or writing to an open file.
    #[error("i/o error: {reason}")]
    Io {
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Returned when the file contains a NUL byte or a byte with the high
    /// bit set (the format is 7-bit clean).
    #[error("file contains invalid chars")]
    InvalidChar,

    /// Returned when a line exceeds the maximum line length.
    #[error("file contains a line which is too long")]
    LineTooLong,

    /// Returned when the file ends before the structure is complete.
    #[error("unexpected file end")]
    UnexpectedEof,

    /// Returned when a line of the first header block does not match its
    /// fixed expected shape and position.
    #[error("first header part: invalid structure ({field})")]
    HeaderStructure {
        /// The header field whose line was malformed.
        field: &'static str,
    },

    /// Returned when the `TimeMode` header value is neither 0 nor 1.
    #[error("first header part: {source}")]
    TimeMode {
        /// The out-of-range mode value.
        #[source]
        source: InvalidTimeMode,
    },

    /// Returned when a column line of the second header block is malformed.
    #[error("second header part: invalid structure")]
    ColumnStructure,

    /// Returned when a column declares an unknown type token.
    #[error("second header part: invalid column type '{token}'")]
    InvalidColumnKind {
        /// The unrecognized type token.
        token: String,
    },

    /// Returned when more than the supported number of columns is declared.
    #[error("second header part: too many columns (max {max})")]
    TooManyColumns {
        /// Maximum number of columns supported.
        max: usize,
    },

    /// Returned when two columns share an id.
    #[error("second header part: column ids are not unique (id {id})")]
    DuplicateColumnId {
        /// The duplicated column id.
        id: u32,
    },

    /// Returned when a measurement line carries the wrong number of values.
    #[error("measurement lines: invalid number of values in line (expected {expected}, got {got})")]
    ValueCount {
        /// Expected token count (columns + date + time).
        expected: usize,
        /// Token count found on the line.
        got: usize,
    },

    /// Returned when a measurement token exceeds the maximum token length.
    #[error("measurement lines: a value is too long")]
    ValueTooLong,

    /// Returned when a measurement line carries an invalid date or time, or
    /// a date that differs from the header date.
    #[error("measurement lines: invalid date or time value")]
    InvalidDateOrTime,

    /// Returned when measurement lines are not strictly increasing in time.
    #[error("measurement lines: invalid line order")]
    LineOrder,

    /// Returned when measurement lines remain after the last time slot.
    #[error("too many lines")]
    TooManyLines,

    /// Returned when a record fails validation before writing.
    #[error("invalid day record: {reason}")]
    InvalidRecord {
        /// Description of the violated invariant.
        reason: String,
    },
}

impl DayfileError {
    /// Returns the historical numeric error code of this failure class.
    pub fn code(&self) -> u32 {
        match self {
            Self::Open { .. } => 1,
            Self::Io { .. } => 1,
            Self::InvalidChar => 2,
            Self::LineTooLong => 3,
            Self::UnexpectedEof => 4,
            Self::HeaderStructure { .. } => 5,
            Self::TimeMode { .. } => 6,
            Self::ColumnStructure => 7,
            Self::InvalidColumnKind { .. } => 8,
            Self::TooManyColumns { .. } => 9,
            Self::DuplicateColumnId { .. } => 10,
            Self::ValueCount { .. } => 11,
            Self::ValueTooLong => 12,
            Self::InvalidDateOrTime => 13,
            Self::LineOrder => 14,
            Self::TooManyLines => 15,
            Self::InvalidRecord { .. } => 16,
        }
    }
}

impl From<std::io::Error> for DayfileError {
    fn from(e: std::io::Error) -> Self {
        DayfileError::Io {
            reason: e.to_string(),
        }
    }
}

/// Error type for typed column-view operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when no column of the requested type and id exists.
    #[error("no column of type {kind} with id {id}")]
    NoSuchColumn {
        /// Requested column type token.
        kind: &'static str,
        /// Requested column id.
        id: u32,
    },

    /// Returned when two series with different time bases or lengths are
    /// merged.
    #[error("series time bases differ")]
    TimeBaseMismatch,
}

/// Error type for month assembly and month-level views.
#[derive(Debug, thiserror::Error)]
pub enum MonthError {
    /// Returned when the target year/month pair is invalid.
    #[error("invalid month: {month}.{year}")]
    InvalidMonth {
        /// Requested year.
        year: u16,
        /// Requested month.
        month: u8,
    },

    /// Returned when no day file of the month could be found at all.
    #[error("no dayfiles found")]
    NoFiles,

    /// Returned when a day's location id differs from the month's.
    #[error("dayfiles have different location ids (day {day}: {got}, expected {expected})")]
    LocationMismatch {
        /// Day of month (1-based) of the offending file.
        day: u8,
        /// Location id fixed by the first valid day.
        expected: u32,
        /// Location id found.
        got: u32,
    },

    /// Returned when a day's time mode differs from the month's.
    #[error("dayfiles have different time modes (day {day})")]
    TimeModeMismatch {
        /// Day of month (1-based) of the offending file.
        day: u8,
    },

    /// Returned when a day file exists but fails to read for any reason
    /// other than being absent.
    #[error("day {day}: {source}")]
    Day {
        /// Day of month (1-based) of the failing file.
        day: u8,
        /// The underlying read failure.
        #[source]
        source: DayfileError,
    },
}

impl MonthError {
    /// Returns the historical numeric error code: small codes for
    /// month-level failures, `day * 100 + code` for a tagged per-day error.
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidMonth { .. } => 1,
            Self::NoFiles => 2,
            Self::LocationMismatch { .. } => 3,
            Self::TimeModeMismatch { .. } => 4,
            Self::Day { day, source } => *day as u32 * 100 + source.code(),
        }
    }
}
