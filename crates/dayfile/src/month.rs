//! Month assembly and month-level views.
//!
//! A month is assembled from up to 31 day files named `yyyy-mm-dd.txt` in
//! one directory. Absent files leave their day invalid; any other read
//! failure aborts the whole month, tagged with the day number.

use std::path::Path;

use aeolus_calendar::Date;
use aeolus_values::TimeMode;
use tracing::{debug, warn};

use crate::error::{DayfileError, MonthError, SeriesError};
use crate::profile::HeaderMode;
use crate::read::read_day;
use crate::record::{ColumnKind, DayRecord};
use crate::series::{DaySeries, SlotRange};

/// Up to one day record per day of one calendar month.
#[derive(Debug, Clone)]
pub struct MonthRecord {
    pub(crate) first_day: Date,
    pub(crate) location_id: u32,
    pub(crate) location_name: String,
    pub(crate) time_mode: TimeMode,
    /// Index 0 is day 1; `None` marks an invalid day.
    pub(crate) days: Vec<Option<DayRecord>>,
}

impl MonthRecord {
    /// Returns the first day of the month.
    pub fn first_day(&self) -> Date {
        self.first_day
    }

    /// Returns the location id shared by all valid days.
    pub fn location_id(&self) -> u32 {
        self.location_id
    }

    /// Returns the location name of the first valid day.
    pub fn location_name(&self) -> &str {
        &self.location_name
    }

    /// Returns the time-base mode shared by all valid days.
    pub fn time_mode(&self) -> TimeMode {
        self.time_mode
    }

    /// Returns the number of days in the month.
    pub fn days_in_month(&self) -> u8 {
        self.days.len() as u8
    }

    /// Returns the record of a day (1-based), if that day is valid.
    pub fn day(&self, day: u8) -> Option<&DayRecord> {
        if day == 0 {
            return None;
        }
        self.days.get(usize::from(day) - 1)?.as_ref()
    }

    /// Counts valid days.
    pub fn valid_days(&self) -> usize {
        self.days.iter().filter(|d| d.is_some()).count()
    }
}

/// Assembles a month from the day files in `dir`.
///
/// The first valid day fixes the month's location id and time-base; later
/// days must agree. At least one day must be present.
///
/// # Errors
///
/// Returns [`MonthError::InvalidMonth`] for an impossible year/month,
/// [`MonthError::NoFiles`] when no day file exists at all,
/// [`MonthError::LocationMismatch`] / [`MonthError::TimeModeMismatch`] on
/// disagreeing headers, and [`MonthError::Day`] when any day fails to read
/// for a reason other than being absent.
pub fn read_month(
    dir: impl AsRef<Path>,
    year: u16,
    month: u8,
    header: HeaderMode<'_>,
) -> Result<MonthRecord, MonthError> {
    let dir = dir.as_ref();
    let first_day = Date::new(year, month, 1).map_err(|_| MonthError::InvalidMonth { year, month })?;
    let day_count = first_day.days_in_month();

    let mut days: Vec<Option<DayRecord>> = Vec::with_capacity(usize::from(day_count));
    let mut fixed: Option<(u32, String, TimeMode)> = None;

    for day in 1..=day_count {
        let date = Date::new(year, month, day)
            .map_err(|_| MonthError::InvalidMonth { year, month })?;
        let path = dir.join(format!("{}.txt", date.file_stem()));

        let record = match read_day(&path, header) {
            Ok(record) => record,
            Err(DayfileError::Open { .. }) => {
                debug!(path = %path.display(), "day file absent");
                days.push(None);
                continue;
            }
            Err(source) => {
                warn!(path = %path.display(), code = source.code(), "day file rejected");
                return Err(MonthError::Day { day, source });
            }
        };

        match &fixed {
            None => {
                fixed = Some((
                    record.location_id(),
                    record.location_name().to_string(),
                    record.time_mode(),
                ));
            }
            Some((id, _, mode)) => {
                if record.location_id() != *id {
                    return Err(MonthError::LocationMismatch {
                        day,
                        expected: *id,
                        got: record.location_id(),
                    });
                }
                if record.time_mode() != *mode {
                    return Err(MonthError::TimeModeMismatch { day });
                }
            }
        }
        days.push(Some(record));
    }

    let (location_id, location_name, time_mode) = fixed.ok_or(MonthError::NoFiles)?;
    debug!(
        year,
        month,
        valid = days.iter().filter(|d| d.is_some()).count(),
        "month assembled"
    );

    Ok(MonthRecord {
        first_day,
        location_id,
        location_name,
        time_mode,
        days,
    })
}

/// One decoded measurement column across a whole month.
#[derive(Debug, Clone)]
pub struct MonthSeries {
    kind: ColumnKind,
    name: String,
    /// Index 0 is day 1; `None` marks an invalid day.
    days: Vec<Option<DaySeries>>,
}

impl MonthSeries {
    /// Decodes the column of the given type and id from every valid day.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::NoSuchColumn`] when any valid day lacks the
    /// column; a month-level series requires it everywhere.
    pub fn extract(month: &MonthRecord, kind: ColumnKind, id: u32) -> Result<Self, SeriesError> {
        let mut days: Vec<Option<DaySeries>> = Vec::with_capacity(month.days.len());
        let mut name = String::new();
        for record in &month.days {
            match record {
                Some(record) => {
                    let series = DaySeries::extract(record, kind, id)?;
                    name = series.name().to_string();
                    days.push(Some(series));
                }
                None => days.push(None),
            }
        }
        Ok(Self { kind, name, days })
    }

    /// Returns the column type.
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the per-day series in day order.
    pub fn days(&self) -> &[Option<DaySeries>] {
        &self.days
    }

    /// Returns the series of a day (1-based), if that day is valid.
    pub fn day(&self, day: u8) -> Option<&DaySeries> {
        if day == 0 {
            return None;
        }
        self.days.get(usize::from(day) - 1)?.as_ref()
    }

    /// Returns the mean over all valid slots of all valid days, or `None`
    /// when the month holds no valid value at all.
    pub fn average(&self) -> Option<i32> {
        let mut sum = 0i64;
        let mut count = 0i64;
        for series in self.days.iter().flatten() {
            for v in series.values().iter().flatten() {
                sum += i64::from(*v);
                count += 1;
            }
        }
        if count == 0 {
            return None;
        }
        Some((sum / count) as i32)
    }

    /// Returns the total over all valid slots of all valid days, or `None`
    /// when the month holds no valid value. Mainly useful for rain.
    pub fn sum(&self) -> Option<i64> {
        let mut sum = 0i64;
        let mut any = false;
        for series in self.days.iter().flatten() {
            if let Some(s) = series.sum() {
                sum += s;
                any = true;
            }
        }
        any.then_some(sum)
    }

    /// Returns the 1-based day and slot of the month's maximum value; the
    /// latest day and slot win ties. `None` when the month holds no valid
    /// value.
    pub fn day_of_max(&self) -> Option<(u8, usize)> {
        let mut found: Option<(i32, u8, usize)> = None;
        for (i, series) in self.days.iter().enumerate() {
            let Some(series) = series else { continue };
            if series.all_missing() {
                continue;
            }
            let slot = series.index_of_max();
            let Some(value) = series.get(slot) else { continue };
            if found.map_or(true, |(best, _, _)| value >= best) {
                found = Some((value, i as u8 + 1, slot));
            }
        }
        found.map(|(_, day, slot)| (day, slot))
    }

    /// Returns the 1-based day and slot of the month's minimum value; the
    /// latest day and slot win ties. `None` when the month holds no valid
    /// value.
    pub fn day_of_min(&self) -> Option<(u8, usize)> {
        let mut found: Option<(i32, u8, usize)> = None;
        for (i, series) in self.days.iter().enumerate() {
            let Some(series) = series else { continue };
            if series.all_missing() {
                continue;
            }
            let slot = series.index_of_min();
            let Some(value) = series.get(slot) else { continue };
            if found.map_or(true, |(best, _, _)| value <= best) {
                found = Some((value, i as u8 + 1, slot));
            }
        }
        found.map(|(_, day, slot)| (day, slot))
    }

    /// Merges two month series day by day with [`DaySeries::merge`]. A day
    /// valid in only one series is carried over unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::TimeBaseMismatch`] when the series cover a
    /// different number of days or any shared day has mismatched modes.
    pub fn merge(
        name: impl Into<String>,
        a: &MonthSeries,
        window_a: &SlotRange,
        b: &MonthSeries,
        window_b: &SlotRange,
    ) -> Result<MonthSeries, SeriesError> {
        if a.days.len() != b.days.len() {
            return Err(SeriesError::TimeBaseMismatch);
        }
        let name = name.into();

        let mut days: Vec<Option<DaySeries>> = Vec::with_capacity(a.days.len());
        for (da, db) in a.days.iter().zip(&b.days) {
            let merged = match (da, db) {
                (Some(da), Some(db)) => {
                    Some(DaySeries::merge(name.clone(), da, window_a, db, window_b)?)
                }
                (Some(da), None) => Some(da.clone()),
                (None, Some(db)) => Some(db.clone()),
                (None, None) => None,
            };
            days.push(merged);
        }

        Ok(MonthSeries {
            kind: a.kind,
            name,
            days,
        })
    }
}
