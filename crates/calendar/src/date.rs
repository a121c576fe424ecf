//! Validated calendar date with day arithmetic.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::CalendarError;
use crate::unix::{
    self, DAYS_PER_MONTH, MAX_YEAR, MIN_YEAR, SECONDS_PER_DAY,
};

/// Returns `true` when `year` is a Gregorian leap year.
pub fn is_leap(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Day of the week, numbered 1 (Monday) through 7 (Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    /// Returns the weekday number (1 = Monday .. 7 = Sunday).
    pub fn number(self) -> u8 {
        self as u8
    }

    fn from_number(n: u32) -> Self {
        match n {
            1 => Self::Monday,
            2 => Self::Tuesday,
            3 => Self::Wednesday,
            4 => Self::Thursday,
            5 => Self::Friday,
            6 => Self::Saturday,
            _ => Self::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        };
        f.write_str(name)
    }
}

/// A calendar date in the supported range 1970-01-01..=2105-12-31.
///
/// Always valid by construction: the constructors reject out-of-range years,
/// bad months and days that do not exist in the addressed month (leap
/// February included). Ordering is plain field order, which coincides with
/// the civil-time order produced by [`Date::to_unix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year: u16,
    month: u8,
    day: u8,
}

impl Date {
    /// Creates a new `Date` from year, month and day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] if the year is outside 1970..=2105, the
    /// month is outside 1..=12, or the day does not exist in that month.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, CalendarError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::InvalidYear { year });
        }
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        let max_day = month_length(year, month);
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::InvalidDay {
                day,
                month,
                max_day,
            });
        }
        Ok(Self { year, month, day })
    }

    /// Parses a date from the day-file shape `d.m.yyyy` (one- or two-digit
    /// day and month, four-digit year).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::UnparseableDate`] when the string does not
    /// match the shape, or the underlying validation error when the parsed
    /// numbers do not form a valid date.
    pub fn parse(input: &str) -> Result<Self, CalendarError> {
        let unparseable = || CalendarError::UnparseableDate {
            input: input.to_string(),
        };

        if !(8..=10).contains(&input.len()) {
            return Err(unparseable());
        }

        let mut parts = input.split('.');
        let (day, month, year) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(d), Some(m), Some(y), None) => (d, m, y),
            _ => return Err(unparseable()),
        };

        if !(1..=2).contains(&day.len())
            || !(1..=2).contains(&month.len())
            || year.len() != 4
            || [day, month, year]
                .iter()
                .any(|p| !p.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(unparseable());
        }

        // The all-digit checks above make these parses infallible.
        Self::new(
            year.parse().map_err(|_| unparseable())?,
            month.parse().map_err(|_| unparseable())?,
            day.parse().map_err(|_| unparseable())?,
        )
    }

    /// Returns today's date from the system clock.
    ///
    /// Always resolved in fixed civil time (UTC+1, winter time).
    pub fn today() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::from_unix(secs.min(u32::MAX as u64) as u32)
    }

    /// Returns the year.
    pub fn year(self) -> u16 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Returns the day within the month (1..=31).
    pub fn day(self) -> u8 {
        self.day
    }

    /// Returns the unix-time value of this date's local noon (fixed UTC+1,
    /// never daylight-saving adjusted).
    ///
    /// 1970-01-01 maps to 39 600, so zero is unreachable for a valid date.
    pub fn to_unix(self) -> u32 {
        unix::noon_seconds(self.year, self.month, self.day)
    }

    /// Resolves an arbitrary unix-time value to the civil date it falls on.
    ///
    /// Defined over the full `u32` domain; the few weeks past noon of
    /// 2105-12-31 saturate to 2105-12-31 so the result stays in range.
    pub fn from_unix(unix_time: u32) -> Self {
        let (year, month, day) = unix::resolve(unix_time);
        if year > MAX_YEAR {
            return Self {
                year: MAX_YEAR,
                month: 12,
                day: 31,
            };
        }
        Self { year, month, day }
    }

    /// Returns the following day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] at the 2105-12-31 ceiling.
    pub fn next(self) -> Result<Self, CalendarError> {
        if self.year == MAX_YEAR && self.month == 12 && self.day == 31 {
            return Err(CalendarError::OutOfRange {
                date: self.to_string(),
            });
        }
        Ok(Self::from_unix(self.to_unix() + SECONDS_PER_DAY))
    }

    /// Returns the preceding day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] at the 1970-01-01 floor.
    pub fn prev(self) -> Result<Self, CalendarError> {
        if self.year == MIN_YEAR && self.month == 1 && self.day == 1 {
            return Err(CalendarError::OutOfRange {
                date: self.to_string(),
            });
        }
        Ok(Self::from_unix(self.to_unix() - SECONDS_PER_DAY))
    }

    /// Returns the signed day difference `self - other`.
    pub fn diff_days(self, other: Self) -> i32 {
        let a = (self.to_unix() / SECONDS_PER_DAY) as i64;
        let b = (other.to_unix() / SECONDS_PER_DAY) as i64;
        (a - b) as i32
    }

    /// Returns the day of the week.
    ///
    /// Anchored on 1970-01-01 being a Thursday.
    pub fn day_of_week(self) -> Weekday {
        let days = self.to_unix() / SECONDS_PER_DAY;
        Weekday::from_number((days + 3) % 7 + 1)
    }

    /// Returns `true` when this date falls into the summer-time window of
    /// its year: from the last Sunday of March through the day before the
    /// last Sunday of October.
    pub fn is_summer_time(self) -> bool {
        // March 25 is the earliest possible last Sunday of March; same for
        // October. Scanning forward never leaves the month.
        let first = last_sunday_from(self.year, 3);
        let last = last_sunday_from(self.year, 10).to_unix() - SECONDS_PER_DAY;

        let t = self.to_unix();
        t >= first.to_unix() && t <= last
    }

    /// Returns the number of days in this date's month.
    pub fn days_in_month(self) -> u8 {
        month_length(self.year, self.month)
    }

    /// Returns the number of days in this date's year.
    pub fn days_in_year(self) -> u16 {
        if is_leap(self.year) {
            366
        } else {
            365
        }
    }

    /// Returns the file-name stem `YYYY-MM-DD` used by the day-file naming
    /// convention.
    pub fn file_stem(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for Date {
    /// Formats as `DD.MM.YYYY`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.{:04}", self.day, self.month, self.year)
    }
}

/// Number of days in the given month, leap-adjusted.
fn month_length(year: u16, month: u8) -> u8 {
    if month == 2 && is_leap(year) {
        29
    } else {
        DAYS_PER_MONTH[month as usize]
    }
}

/// First Sunday on or after the 25th of the given month.
fn last_sunday_from(year: u16, month: u8) -> Date {
    let mut date = Date {
        year,
        month,
        day: 25,
    };
    while date.day_of_week() != Weekday::Sunday {
        date.day += 1;
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_rule() {
        assert!(is_leap(2020));
        assert!(!is_leap(1900));
        assert!(is_leap(2000));
        assert!(!is_leap(2021));
        assert!(!is_leap(2100));
    }

    #[test]
    fn new_valid() {
        let date = Date::new(2020, 2, 29).unwrap();
        assert_eq!(date.year(), 2020);
        assert_eq!(date.month(), 2);
        assert_eq!(date.day(), 29);
    }

    #[test]
    fn new_invalid_leap_day() {
        assert_eq!(
            Date::new(2021, 2, 29).unwrap_err(),
            CalendarError::InvalidDay {
                day: 29,
                month: 2,
                max_day: 28,
            }
        );
    }

    #[test]
    fn new_year_bounds() {
        assert!(Date::new(1970, 1, 1).is_ok());
        assert!(Date::new(2105, 12, 31).is_ok());
        assert_eq!(
            Date::new(1969, 12, 31).unwrap_err(),
            CalendarError::InvalidYear { year: 1969 }
        );
        assert_eq!(
            Date::new(2106, 1, 1).unwrap_err(),
            CalendarError::InvalidYear { year: 2106 }
        );
    }

    #[test]
    fn new_invalid_month() {
        assert_eq!(
            Date::new(2000, 13, 1).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
        assert_eq!(
            Date::new(2000, 0, 1).unwrap_err(),
            CalendarError::InvalidMonth { month: 0 }
        );
    }

    #[test]
    fn parse_all_widths() {
        assert_eq!(Date::parse("1.2.1990").unwrap(), Date::new(1990, 2, 1).unwrap());
        assert_eq!(Date::parse("01.2.1990").unwrap(), Date::new(1990, 2, 1).unwrap());
        assert_eq!(Date::parse("1.02.1990").unwrap(), Date::new(1990, 2, 1).unwrap());
        assert_eq!(Date::parse("27.12.2021").unwrap(), Date::new(2021, 12, 27).unwrap());
    }

    #[test]
    fn parse_rejects_other_shapes() {
        for bad in [
            "2021-12-27",
            "27.12.21",
            "27,12,2021",
            "271.2.2021",
            "27.12.2021x",
            "",
            "..2021",
            "27.12.02021",
        ] {
            assert!(
                matches!(
                    Date::parse(bad),
                    Err(CalendarError::UnparseableDate { .. })
                ),
                "accepted: {bad:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_valid_shape_invalid_date() {
        assert_eq!(
            Date::parse("29.2.2021").unwrap_err(),
            CalendarError::InvalidDay {
                day: 29,
                month: 2,
                max_day: 28,
            }
        );
    }

    #[test]
    fn epoch_to_unix() {
        assert_eq!(Date::new(1970, 1, 1).unwrap().to_unix(), 39_600);
    }

    #[test]
    fn epoch_weekday_is_thursday() {
        let date = Date::new(1970, 1, 1).unwrap();
        assert_eq!(date.day_of_week(), Weekday::Thursday);
        assert_eq!(date.day_of_week().number(), 4);
    }

    #[test]
    fn known_weekdays() {
        // 27.12.2021 was a Monday.
        assert_eq!(
            Date::new(2021, 12, 27).unwrap().day_of_week(),
            Weekday::Monday
        );
        // 29.02.2020 was a Saturday.
        assert_eq!(
            Date::new(2020, 2, 29).unwrap().day_of_week(),
            Weekday::Saturday
        );
    }

    #[test]
    fn next_within_month() {
        let date = Date::new(2021, 6, 15).unwrap();
        assert_eq!(date.next().unwrap(), Date::new(2021, 6, 16).unwrap());
    }

    #[test]
    fn next_over_leap_day() {
        let date = Date::new(2020, 2, 28).unwrap();
        assert_eq!(date.next().unwrap(), Date::new(2020, 2, 29).unwrap());
        assert_eq!(
            date.next().unwrap().next().unwrap(),
            Date::new(2020, 3, 1).unwrap()
        );
    }

    #[test]
    fn next_year_wrap() {
        let date = Date::new(1999, 12, 31).unwrap();
        assert_eq!(date.next().unwrap(), Date::new(2000, 1, 1).unwrap());
    }

    #[test]
    fn next_fails_at_ceiling() {
        let date = Date::new(2105, 12, 31).unwrap();
        assert_eq!(
            date.next().unwrap_err(),
            CalendarError::OutOfRange {
                date: "31.12.2105".to_string(),
            }
        );
    }

    #[test]
    fn prev_fails_at_floor() {
        let date = Date::new(1970, 1, 1).unwrap();
        assert_eq!(
            date.prev().unwrap_err(),
            CalendarError::OutOfRange {
                date: "01.01.1970".to_string(),
            }
        );
    }

    #[test]
    fn prev_year_wrap() {
        let date = Date::new(2000, 1, 1).unwrap();
        assert_eq!(date.prev().unwrap(), Date::new(1999, 12, 31).unwrap());
    }

    #[test]
    fn diff_days_signed() {
        let a = Date::new(2021, 1, 10).unwrap();
        let b = Date::new(2021, 1, 1).unwrap();
        assert_eq!(a.diff_days(b), 9);
        assert_eq!(b.diff_days(a), -9);
        assert_eq!(a.diff_days(a), 0);
    }

    #[test]
    fn summer_time_2021() {
        // 2021: summer time 28.03. through 30.10. (clocks back on 31.10.).
        assert!(!Date::new(2021, 3, 27).unwrap().is_summer_time());
        assert!(Date::new(2021, 3, 28).unwrap().is_summer_time());
        assert!(Date::new(2021, 7, 1).unwrap().is_summer_time());
        assert!(Date::new(2021, 10, 30).unwrap().is_summer_time());
        assert!(!Date::new(2021, 10, 31).unwrap().is_summer_time());
        assert!(!Date::new(2021, 1, 15).unwrap().is_summer_time());
    }

    #[test]
    fn days_in_month_leap() {
        assert_eq!(Date::new(2020, 2, 1).unwrap().days_in_month(), 29);
        assert_eq!(Date::new(2021, 2, 1).unwrap().days_in_month(), 28);
        assert_eq!(Date::new(2021, 1, 1).unwrap().days_in_month(), 31);
        assert_eq!(Date::new(2021, 4, 1).unwrap().days_in_month(), 30);
    }

    #[test]
    fn days_in_year_leap() {
        assert_eq!(Date::new(2020, 6, 1).unwrap().days_in_year(), 366);
        assert_eq!(Date::new(2021, 6, 1).unwrap().days_in_year(), 365);
    }

    #[test]
    fn display_format() {
        assert_eq!(Date::new(2021, 12, 27).unwrap().to_string(), "27.12.2021");
        assert_eq!(Date::new(1970, 1, 1).unwrap().to_string(), "01.01.1970");
    }

    #[test]
    fn file_stem_format() {
        assert_eq!(
            Date::new(2021, 12, 27).unwrap().file_stem(),
            "2021-12-27"
        );
        assert_eq!(Date::new(1970, 1, 5).unwrap().file_stem(), "1970-01-05");
    }

    #[test]
    fn ord_matches_unix_order() {
        let a = Date::new(1999, 12, 31).unwrap();
        let b = Date::new(2000, 1, 1).unwrap();
        assert!(a < b);
        assert!(a.to_unix() < b.to_unix());
    }

    #[test]
    fn copy_trait() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<Date>();
        assert_copy::<Weekday>();
    }
}
