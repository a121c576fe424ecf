//! # aeolus-calendar
//!
//! Gregorian date arithmetic for the day-file toolkit.
//!
//! All conversions are anchored on unsigned 32-bit civil time with a fixed
//! UTC+1 offset, which bounds the supported range to 1970-01-01..=2105-12-31.
//! A [`Date`] is valid by construction; every fallible operation returns a
//! [`CalendarError`].
//!
//! ## Quick Start
//!
//! ```
//! use aeolus_calendar::{Date, Weekday};
//!
//! let date = Date::new(1970, 1, 1).unwrap();
//! assert_eq!(date.to_unix(), 39_600); // noon, UTC+1
//! assert_eq!(date.day_of_week(), Weekday::Thursday);
//! assert_eq!(date.to_string(), "01.01.1970");
//! assert_eq!(date.file_stem(), "1970-01-01");
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `date` | Validated calendar date, arithmetic, weekday, summer time |
//! | `unix` | Date to/from civil-noon seconds, leap-day tables |
//! | `error` | Error types |

mod date;
mod error;
mod unix;

pub use date::{is_leap, Date, Weekday};
pub use error::CalendarError;
pub use unix::{MAX_YEAR, MIN_YEAR, SECONDS_PER_DAY};
