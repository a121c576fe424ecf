//! # aeolus-values
//!
//! Strict string/fixed-point codecs for the measurement values stored in
//! day files: generic integers, 15-minute time slots, temperatures in
//! tenths of a degree, rainfall in hundredths of a millimetre, and boolean
//! events.
//!
//! Decoders return `Option`: `None` replaces the reserved on-disk error
//! sentinel ([`SENTINEL`]), which stays public for the serialization
//! boundary. All valid magnitudes lie strictly inside the sentinel bound.
//!
//! ## Quick Start
//!
//! ```
//! use aeolus_values::{parse_rain, parse_temperature, format_temperature, Width};
//!
//! assert_eq!(parse_temperature("-13.7"), Some(-137));
//! assert_eq!(format_temperature(Width::Fixed, -7).as_deref(), Some(" -0.7"));
//! assert_eq!(parse_rain("12.75"), Some(1275));
//! assert_eq!(parse_rain("12.4"), Some(155)); // legacy tenths form, x5/4
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `number` | Bounded integer parsers and the error sentinel |
//! | `time` | Time-base modes and slot index conversion |
//! | `temperature` | Temperature codec |
//! | `rain` | Rainfall codec with legacy-format detection |
//! | `event` | Boolean event codec |

mod event;
mod number;
mod rain;
mod temperature;
mod time;

pub use event::{format_event, parse_event};
pub use number::{parse_i32, parse_u32, MAX_TOKEN_LEN, SENTINEL};
pub use rain::{format_rain, parse_rain};
pub use temperature::{format_temperature, parse_temperature};
pub use time::{format_slot, parse_slot, InvalidTimeMode, TimeMode, SLOTS_PER_DAY};

/// Output width selector shared by the temperature and rain encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Minimal width, no padding.
    Variable,
    /// Fixed five characters, space-padded on the left.
    Fixed,
}
