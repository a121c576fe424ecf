//! Day-file parser.
//!
//! Reading is a fixed sequence: the five-line location header, the column
//! block, the measurement lines, then a terminal end-of-file check. Files
//! without headers are parsed through a [`Profile`] that supplies the
//! missing metadata.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use aeolus_calendar::Date;
use aeolus_values::{parse_slot, parse_u32, TimeMode, MAX_TOKEN_LEN, SLOTS_PER_DAY};
use tracing::debug;

use crate::error::DayfileError;
use crate::line::{self, next_line};
use crate::profile::{HeaderMode, Profile};
use crate::record::{Column, ColumnKind, DayRecord, MAX_COLUMNS, MAX_COMMENT_LEN, MAX_NAME_LEN};

/// Lines starting with this prefix separate the header blocks.
const SEPARATOR_PREFIX: &str = "----------";

/// Reads one day file into a [`DayRecord`].
///
/// With [`HeaderMode::Embedded`] the file must carry both header blocks.
/// With [`HeaderMode::Profile`] the file is bare measurement lines; the
/// date is recovered from the first line, the header is synthesized from
/// the profile, and the file is re-read from a fresh handle.
///
/// # Errors
///
/// Any structural violation aborts the read; no partial record is
/// returned. [`DayfileError::code`] maps each failure to its numeric code.
pub fn read_day(path: impl AsRef<Path>, header: HeaderMode<'_>) -> Result<DayRecord, DayfileError> {
    let path = path.as_ref();
    let mut reader = open(path)?;

    let mut record = match header {
        HeaderMode::Embedded => read_header(&mut reader)?,
        HeaderMode::Profile(profile) => {
            let record = synthesize_header(&mut reader, profile)?;
            // The first data line was consumed while probing for the date;
            // phase 3 needs it again, so restart on a fresh handle.
            reader = open(path)?;
            record
        }
    };

    debug!(
        path = %path.display(),
        location = record.location_id,
        date = %record.date,
        columns = record.columns.len(),
        "day header ready"
    );

    read_measurements(&mut reader, &mut record)?;

    debug!(
        path = %path.display(),
        missing = record.missing_slots(),
        "day file read"
    );
    Ok(record)
}

fn open(path: &Path) -> Result<BufReader<File>, DayfileError> {
    let file = File::open(path).map_err(|_| DayfileError::Open {
        path: path.to_path_buf(),
    })?;
    Ok(BufReader::new(file))
}

/// Parses the five-line location header and the column block.
fn read_header(reader: &mut BufReader<File>) -> Result<DayRecord, DayfileError> {
    let location_line = require_line(reader)?;
    let location = header_value(&location_line, "Location")?;
    let (location_id, location_name) = {
        let (id, name) = location
            .split_once(',')
            .ok_or(DayfileError::HeaderStructure { field: "Location" })?;
        let id = parse_u32(id.trim())
            .ok_or(DayfileError::HeaderStructure { field: "Location" })?;
        let name = quoted(name.trim(), MAX_NAME_LEN)
            .ok_or(DayfileError::HeaderStructure { field: "Location" })?;
        (id, name)
    };

    let mode_line = require_line(reader)?;
    let mode_text = header_value(&mode_line, "TimeMode")?;
    let mode_number =
        parse_u32(mode_text).ok_or(DayfileError::HeaderStructure { field: "TimeMode" })?;
    let time_mode =
        TimeMode::from_number(mode_number).map_err(|source| DayfileError::TimeMode { source })?;

    let date_line = require_line(reader)?;
    let date_text = header_value(&date_line, "Date")?;
    let date =
        Date::parse(date_text).map_err(|_| DayfileError::HeaderStructure { field: "Date" })?;

    let comment_line = require_line(reader)?;
    let comment_text = header_value(&comment_line, "Comment")?;
    let comment = quoted(comment_text, MAX_COMMENT_LEN)
        .ok_or(DayfileError::HeaderStructure { field: "Comment" })?;

    let separator = require_line(reader)?;
    if !separator.starts_with(SEPARATOR_PREFIX) {
        return Err(DayfileError::HeaderStructure { field: "separator" });
    }

    let columns = read_columns(reader)?;

    DayRecord::new(location_id, location_name, time_mode, date, comment, columns)
}

/// Parses `ColumnNN = <id>, <kind>, "<name>"` lines up to the closing
/// separator.
fn read_columns(reader: &mut BufReader<File>) -> Result<Vec<Column>, DayfileError> {
    let mut columns: Vec<Column> = Vec::new();
    loop {
        let line = require_line(reader)?;
        if line.starts_with(SEPARATOR_PREFIX) {
            if columns.is_empty() {
                return Err(DayfileError::ColumnStructure);
            }
            return Ok(columns);
        }
        if columns.len() == MAX_COLUMNS {
            return Err(DayfileError::TooManyColumns { max: MAX_COLUMNS });
        }

        let rest = line
            .strip_prefix("Column")
            .ok_or(DayfileError::ColumnStructure)?;
        let number = rest.get(..2).ok_or(DayfileError::ColumnStructure)?;
        let position = parse_u32(number).ok_or(DayfileError::ColumnStructure)?;
        if position as usize != columns.len() + 1 {
            return Err(DayfileError::ColumnStructure);
        }
        let value = rest[2..]
            .trim_start()
            .strip_prefix('=')
            .ok_or(DayfileError::ColumnStructure)?;

        let mut parts = value.splitn(3, ',');
        let id = parts
            .next()
            .and_then(|p| parse_u32(p.trim()))
            .ok_or(DayfileError::ColumnStructure)?;
        let kind_token = parts
            .next()
            .map(str::trim)
            .ok_or(DayfileError::ColumnStructure)?;
        let kind =
            ColumnKind::from_token(kind_token).ok_or_else(|| DayfileError::InvalidColumnKind {
                token: kind_token.to_string(),
            })?;
        let name = parts
            .next()
            .and_then(|p| quoted(p.trim(), MAX_NAME_LEN))
            .ok_or(DayfileError::ColumnStructure)?;

        if columns.iter().any(|c| c.id == id) {
            return Err(DayfileError::DuplicateColumnId { id });
        }
        columns.push(Column { kind, id, name });
    }
}

/// Probes the first measurement line for its date and builds an empty
/// record from the profile's metadata.
fn synthesize_header(
    reader: &mut BufReader<File>,
    profile: &Profile,
) -> Result<DayRecord, DayfileError> {
    let first = require_line(reader)?;
    let date_token = line::token(&first, 0).ok_or(DayfileError::InvalidDateOrTime)?;
    if date_token.len() > MAX_TOKEN_LEN {
        return Err(DayfileError::ValueTooLong);
    }
    let date = Date::parse(date_token).map_err(|_| DayfileError::InvalidDateOrTime)?;

    DayRecord::new(
        profile.location_id,
        profile.location_name.clone(),
        profile.time_mode,
        date,
        "",
        profile.columns.clone(),
    )
}

/// Parses measurement lines into the record's slots and runs the terminal
/// end-of-file check.
fn read_measurements(
    reader: &mut BufReader<File>,
    record: &mut DayRecord,
) -> Result<(), DayfileError> {
    let expected = record.columns.len() + 2;
    let mut next_slot = 0usize;
    let mut any = false;

    while let Some(text) = next_line(reader)? {
        let got = line::count_tokens(&text);
        if got != expected {
            return Err(DayfileError::ValueCount { expected, got });
        }

        let date_token = line::token(&text, 0).ok_or(DayfileError::InvalidDateOrTime)?;
        if date_token.len() > MAX_TOKEN_LEN {
            return Err(DayfileError::ValueTooLong);
        }
        let date = Date::parse(date_token).map_err(|_| DayfileError::InvalidDateOrTime)?;
        if date != record.date {
            return Err(DayfileError::InvalidDateOrTime);
        }

        let time_token = line::token(&text, 1).ok_or(DayfileError::InvalidDateOrTime)?;
        let slot = parse_slot(record.time_mode, time_token)
            .ok_or(DayfileError::InvalidDateOrTime)?;
        if slot < next_slot {
            return Err(DayfileError::LineOrder);
        }

        for k in 2..expected {
            let token = line::token(&text, k).ok_or(DayfileError::InvalidDateOrTime)?;
            if token.len() > MAX_TOKEN_LEN {
                return Err(DayfileError::ValueTooLong);
            }
        }

        record.slots[slot] = Some(text);
        next_slot = slot + 1;
        any = true;

        if next_slot == SLOTS_PER_DAY {
            if next_line(reader)?.is_some() {
                return Err(DayfileError::TooManyLines);
            }
            break;
        }
    }

    if !any {
        return Err(DayfileError::UnexpectedEof);
    }
    Ok(())
}

/// Reads the next non-blank line, failing on end of file.
fn require_line(reader: &mut BufReader<File>) -> Result<String, DayfileError> {
    next_line(reader)?.ok_or(DayfileError::UnexpectedEof)
}

/// Extracts `<value>` from a `<key> = <value>` header line. The key must
/// start the line; spacing around the `=` is free.
fn header_value<'a>(line: &'a str, key: &'static str) -> Result<&'a str, DayfileError> {
    let rest = line
        .strip_prefix(key)
        .ok_or(DayfileError::HeaderStructure { field: key })?;
    let rest = rest
        .trim_start()
        .strip_prefix('=')
        .ok_or(DayfileError::HeaderStructure { field: key })?;
    Ok(rest.trim())
}

/// Strips surrounding quotes and enforces the length bound.
fn quoted(s: &str, max_len: usize) -> Option<String> {
    let inner = s.strip_prefix('"')?.strip_suffix('"')?;
    if inner.len() > max_len || inner.contains('"') {
        return None;
    }
    Some(inner.to_string())
}
