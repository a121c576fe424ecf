//! Day-file writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use aeolus_values::{
    format_event, format_rain, format_slot, format_temperature, Width,
};
use tracing::debug;

use crate::error::DayfileError;
use crate::line;
use crate::record::{ColumnKind, DayRecord, MAX_COLUMNS, MAX_COMMENT_LEN, MAX_NAME_LEN};

const SEPARATOR: &str =
    "-------------------------------------------------";

/// How measurement lines are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Write each stored raw line unchanged.
    Verbatim,
    /// Rebuild each line from the date, the winter-time slot label and the
    /// per-column codecs at fixed width. A token its codec rejects is
    /// copied through unchanged.
    Reassemble,
}

/// Writes a day record to `path`, headers first, then one line per
/// populated slot.
///
/// # Errors
///
/// Returns [`DayfileError::InvalidRecord`] when the record violates the
/// format's bounds, [`DayfileError::Open`] when the file cannot be
/// created, and [`DayfileError::Io`] on write failures.
pub fn write_day(
    path: impl AsRef<Path>,
    record: &DayRecord,
    mode: WriteMode,
) -> Result<(), DayfileError> {
    let path = path.as_ref();
    validate(record)?;

    let file = File::create(path).map_err(|_| DayfileError::Open {
        path: path.to_path_buf(),
    })?;
    let mut out = BufWriter::new(file);

    writeln!(
        out,
        "Location = {}, \"{}\"",
        record.location_id, record.location_name
    )?;
    writeln!(out, "TimeMode = {}", record.time_mode.number())?;
    writeln!(out, "Date     = {}", record.date)?;
    writeln!(out, "Comment  = \"{}\"", record.comment)?;
    writeln!(out, "{SEPARATOR}")?;
    for (i, col) in record.columns.iter().enumerate() {
        writeln!(
            out,
            "Column{:02} = {}, {}, \"{}\"",
            i + 1,
            col.id,
            col.kind.token(),
            col.name
        )?;
    }
    writeln!(out, "{SEPARATOR}")?;

    let mut written = 0usize;
    for (slot, raw) in record.slots.iter().enumerate() {
        let Some(raw) = raw else { continue };
        match mode {
            WriteMode::Verbatim => writeln!(out, "{raw}")?,
            WriteMode::Reassemble => {
                let text = reassemble(record, slot, raw)?;
                writeln!(out, "{text}")?;
            }
        }
        written += 1;
    }
    out.flush()?;

    debug!(path = %path.display(), lines = written, ?mode, "day file written");
    Ok(())
}

/// Rebuilds one measurement line with canonical formatting.
fn reassemble(record: &DayRecord, slot: usize, raw: &str) -> Result<String, DayfileError> {
    // Slot index < 96, so the label always exists.
    let label = format_slot(record.time_mode, slot, false).ok_or_else(|| {
        DayfileError::InvalidRecord {
            reason: format!("slot {slot} out of range"),
        }
    })?;

    let date = record.date.to_string();
    let mut text = format!("{date} {label}");
    for (i, col) in record.columns.iter().enumerate() {
        let token = line::token(raw, 2 + i).ok_or_else(|| DayfileError::InvalidRecord {
            reason: format!("line at slot {slot} has too few values"),
        })?;
        let encoded = record.decode_value(slot, i).and_then(|v| match col.kind {
            ColumnKind::Temperature => format_temperature(Width::Fixed, v),
            ColumnKind::Rain => format_rain(Width::Fixed, v as u32),
            ColumnKind::Event => Some(format_event(v != 0).to_string()),
        });
        text.push(' ');
        match encoded {
            Some(e) => text.push_str(&e),
            None => text.push_str(token),
        }
    }
    Ok(text)
}

/// Checks the format's structural bounds before anything is written.
fn validate(record: &DayRecord) -> Result<(), DayfileError> {
    let invalid = |reason: String| DayfileError::InvalidRecord { reason };

    if record.columns.is_empty() || record.columns.len() > MAX_COLUMNS {
        return Err(invalid(format!(
            "column count {} outside 1..={MAX_COLUMNS}",
            record.columns.len()
        )));
    }
    for (i, col) in record.columns.iter().enumerate() {
        if col.name.len() > MAX_NAME_LEN {
            return Err(invalid(format!("column {} name too long", i + 1)));
        }
        if record.columns[..i].iter().any(|c| c.id == col.id) {
            return Err(invalid(format!("duplicate column id {}", col.id)));
        }
    }
    if record.location_name.len() > MAX_NAME_LEN {
        return Err(invalid("location name too long".to_string()));
    }
    if record.comment.len() > MAX_COMMENT_LEN {
        return Err(invalid("comment too long".to_string()));
    }
    if record.slots.iter().all(|s| s.is_none()) {
        return Err(invalid("record has no measurement lines".to_string()));
    }
    Ok(())
}
