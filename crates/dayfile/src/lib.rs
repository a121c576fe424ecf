//! Day-file engine: parsing, rewriting, typed column views and month
//! aggregation for 15-minute weather-station logs.
//!
//! A day file holds one location's measurements for one day in 96 quarter
//! hour slots. [`read_day`] parses a file into a [`DayRecord`]; files
//! without headers are read through a station [`Profile`]. [`write_day`]
//! is the inverse, either verbatim or canonically re-encoded.
//!
//! On top of a parsed record, [`DaySeries`] decodes one column into a
//! typed series with extrema, average, sum and merge operations, and
//! [`read_month`] assembles up to 31 day files into a [`MonthRecord`]
//! with the same operations lifted to the month by [`MonthSeries`].
//!
//! # Quick start
//!
//! ```no_run
//! use aeolus_dayfile::{read_day, ColumnKind, DaySeries, HeaderMode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let record = read_day("2021-12-27.txt", HeaderMode::Embedded)?;
//! let outdoor = DaySeries::extract(&record, ColumnKind::Temperature, 1)?;
//! if !outdoor.all_missing() {
//!     println!("coldest slot: {}", outdoor.index_of_min());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod line;
mod month;
mod profile;
mod read;
mod record;
mod series;
mod write;

pub use error::{DayfileError, MonthError, SeriesError};
pub use month::{read_month, MonthRecord, MonthSeries};
pub use profile::{bretnig, dresden, HeaderMode, Profile};
pub use read::read_day;
pub use record::{
    Column, ColumnKind, DayRecord, MAX_COLUMNS, MAX_COMMENT_LEN, MAX_NAME_LEN,
};
pub use series::{DaySeries, SlotRange};
pub use write::{write_day, WriteMode};
