//! Day record container and post-parse diagnostics.

use aeolus_calendar::Date;
use aeolus_values::{
    parse_event, parse_rain, parse_temperature, TimeMode, SLOTS_PER_DAY,
};

use crate::error::DayfileError;
use crate::line;

/// Maximum number of measurement columns per day file.
pub const MAX_COLUMNS: usize = 32;

/// Maximum length of location and column names.
pub const MAX_NAME_LEN: usize = 49;

/// Maximum length of the day comment.
pub const MAX_COMMENT_LEN: usize = 99;

/// Measurement column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Temperature in tenths of a degree.
    Temperature,
    /// Rainfall in hundredths of a millimetre.
    Rain,
    /// Boolean event (0 or 1).
    Event,
}

impl ColumnKind {
    /// Returns the on-disk type token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Temperature => "TEMP",
            Self::Rain => "RAIN",
            Self::Event => "EVNT",
        }
    }

    /// Decodes an on-disk type token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "TEMP" => Some(Self::Temperature),
            "RAIN" => Some(Self::Rain),
            "EVNT" => Some(Self::Event),
            _ => None,
        }
    }
}

/// One declared measurement column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column type.
    pub kind: ColumnKind,
    /// Numeric id, unique within a day file.
    pub id: u32,
    /// Column name (at most [`MAX_NAME_LEN`] characters).
    pub name: String,
}

/// A parsed or synthesized single-day record.
///
/// Measurement lines are kept as raw text, one optional string per time
/// slot, which preserves lossless verbatim rewrites; typed decoding happens
/// lazily in the column views. A successfully parsed record always has at
/// least one populated slot.
#[derive(Debug, Clone)]
pub struct DayRecord {
    pub(crate) location_id: u32,
    pub(crate) location_name: String,
    pub(crate) time_mode: TimeMode,
    pub(crate) date: Date,
    pub(crate) comment: String,
    pub(crate) columns: Vec<Column>,
    /// Raw measurement lines indexed by slot; `None` means "not recorded".
    pub(crate) slots: Vec<Option<String>>,
}

impl DayRecord {
    /// Creates an empty record with validated header fields, ready to be
    /// filled slot by slot before writing.
    ///
    /// # Errors
    ///
    /// Returns [`DayfileError::InvalidRecord`] when the column list is
    /// empty or oversized, ids repeat, or a name or the comment exceeds its
    /// length bound.
    pub fn new(
        location_id: u32,
        location_name: impl Into<String>,
        time_mode: TimeMode,
        date: Date,
        comment: impl Into<String>,
        columns: Vec<Column>,
    ) -> Result<Self, DayfileError> {
        let location_name = location_name.into();
        let comment = comment.into();

        let invalid = |reason: String| DayfileError::InvalidRecord { reason };

        if columns.is_empty() || columns.len() > MAX_COLUMNS {
            return Err(invalid(format!(
                "column count {} outside 1..={MAX_COLUMNS}",
                columns.len()
            )));
        }
        for (i, col) in columns.iter().enumerate() {
            if col.name.len() > MAX_NAME_LEN {
                return Err(invalid(format!("column {} name too long", i + 1)));
            }
            if columns[..i].iter().any(|c| c.id == col.id) {
                return Err(invalid(format!("duplicate column id {}", col.id)));
            }
        }
        if location_name.len() > MAX_NAME_LEN {
            return Err(invalid("location name too long".to_string()));
        }
        if comment.len() > MAX_COMMENT_LEN {
            return Err(invalid("comment too long".to_string()));
        }

        Ok(Self {
            location_id,
            location_name,
            time_mode,
            date,
            comment,
            columns,
            slots: vec![None; SLOTS_PER_DAY],
        })
    }

    /// Returns the location id.
    pub fn location_id(&self) -> u32 {
        self.location_id
    }

    /// Returns the location name.
    pub fn location_name(&self) -> &str {
        &self.location_name
    }

    /// Returns the time-base mode.
    pub fn time_mode(&self) -> TimeMode {
        self.time_mode
    }

    /// Returns the day's date.
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the free-text comment.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns the declared columns in file order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the raw measurement line of a slot, if recorded.
    pub fn raw_line(&self, slot: usize) -> Option<&str> {
        self.slots.get(slot).and_then(|s| s.as_deref())
    }

    /// Stores a raw measurement line at the given slot.
    ///
    /// # Errors
    ///
    /// Returns [`DayfileError::InvalidRecord`] when the slot index is out
    /// of range.
    pub fn set_raw_line(
        &mut self,
        slot: usize,
        text: impl Into<String>,
    ) -> Result<(), DayfileError> {
        if slot >= SLOTS_PER_DAY {
            return Err(DayfileError::InvalidRecord {
                reason: format!("slot {slot} out of range"),
            });
        }
        self.slots[slot] = Some(text.into());
        Ok(())
    }

    /// Looks up a column by type and id, returning its index.
    pub fn find_column(&self, kind: ColumnKind, id: u32) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.kind == kind && c.id == id)
    }

    /// Decodes the value of `column` at `slot` through the column's codec.
    ///
    /// Temperatures decode to tenths, rain to hundredths, events to 0/1.
    /// `None` means the slot is unrecorded, the token is missing, or the
    /// token fails the codec.
    pub fn decode_value(&self, slot: usize, column: usize) -> Option<i32> {
        let kind = self.columns.get(column)?.kind;
        let raw = self.raw_line(slot)?;
        let tok = line::token(raw, 2 + column)?;
        match kind {
            ColumnKind::Temperature => parse_temperature(tok),
            ColumnKind::Rain => parse_rain(tok).map(|v| v as i32),
            ColumnKind::Event => parse_event(tok).map(i32::from),
        }
    }

    /// Counts unrecorded slots.
    pub fn missing_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }

    /// Counts maximal contiguous runs of unrecorded slots.
    pub fn missing_runs(&self) -> usize {
        let mut runs = 0;
        let mut in_run = false;
        for slot in &self.slots {
            if slot.is_none() {
                if !in_run {
                    runs += 1;
                }
                in_run = true;
            } else {
                in_run = false;
            }
        }
        runs
    }

    /// Counts recorded values that fail their column's codec.
    pub fn invalid_values(&self) -> usize {
        let mut count = 0;
        for column in 0..self.columns.len() {
            for slot in 0..SLOTS_PER_DAY {
                if self.raw_line(slot).is_some() && self.decode_value(slot, column).is_none() {
                    count += 1;
                }
            }
        }
        count
    }

    /// Returns the index of the last recorded slot.
    ///
    /// A successfully parsed record always has one; a freshly synthesized
    /// record without any slot reports 0.
    pub fn last_slot(&self) -> usize {
        self.slots
            .iter()
            .rposition(|s| s.is_some())
            .unwrap_or(0)
    }
}
