//! Station profiles for header-less day files.
//!
//! Some loggers write bare measurement lines without the two header blocks.
//! A profile supplies the missing metadata so such files parse into the
//! same [`DayRecord`](crate::DayRecord) shape as fully headed ones.

use aeolus_values::TimeMode;

use crate::record::Column;
use crate::record::ColumnKind;

/// Header metadata applied to a day file that carries none of its own.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Profile name, used for selection in configuration.
    pub name: String,
    /// Location id written into synthesized headers.
    pub location_id: u32,
    /// Location name written into synthesized headers.
    pub location_name: String,
    /// Slot-numbering convention of the station's logger.
    pub time_mode: TimeMode,
    /// Declared columns in line order.
    pub columns: Vec<Column>,
}

impl Profile {
    /// Looks up a built-in profile by name.
    pub fn builtin(name: &str) -> Option<Profile> {
        match name {
            "bretnig" => Some(bretnig()),
            "dresden" => Some(dresden()),
            _ => None,
        }
    }
}

/// Profile of the Bretnig garden station: one outdoor temperature sensor
/// and one rain gauge, time stamps at slot end.
pub fn bretnig() -> Profile {
    Profile {
        name: "bretnig".to_string(),
        location_id: 4,
        location_name: "Bretnig".to_string(),
        time_mode: TimeMode::SlotEnd,
        columns: vec![
            Column {
                kind: ColumnKind::Temperature,
                id: 1,
                name: "Aussen".to_string(),
            },
            Column {
                kind: ColumnKind::Rain,
                id: 2,
                name: "Regen".to_string(),
            },
        ],
    }
}

/// Profile of the Dresden balcony station: three temperature sensors,
/// time stamps at slot end.
pub fn dresden() -> Profile {
    Profile {
        name: "dresden".to_string(),
        location_id: 7,
        location_name: "Dresden".to_string(),
        time_mode: TimeMode::SlotEnd,
        columns: vec![
            Column {
                kind: ColumnKind::Temperature,
                id: 1,
                name: "Balkon".to_string(),
            },
            Column {
                kind: ColumnKind::Temperature,
                id: 2,
                name: "Zimmer".to_string(),
            },
            Column {
                kind: ColumnKind::Temperature,
                id: 3,
                name: "Keller".to_string(),
            },
        ],
    }
}

/// Selects between embedded headers and a profile when reading a day file.
#[derive(Debug, Clone, Copy)]
pub enum HeaderMode<'a> {
    /// The file carries both header blocks itself.
    Embedded,
    /// The file is bare measurement lines; take metadata from the profile.
    Profile(&'a Profile),
}
