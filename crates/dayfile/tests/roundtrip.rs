//! End-to-end read/write tests against real files on disk.

use std::fs;
use std::path::PathBuf;

use aeolus_dayfile::{
    bretnig, read_day, write_day, ColumnKind, DayfileError, HeaderMode, WriteMode,
};
use tempfile::TempDir;

const CANONICAL: &str = "\
Location = 4, \"Bretnig\"
TimeMode = 1
Date     = 27.12.2021
Comment  = \"frosty\"
-------------------------------------------------
Column01 = 1, TEMP, \"Aussen\"
Column02 = 2, RAIN, \"Regen\"
Column03 = 3, EVNT, \"Heizung\"
-------------------------------------------------
27.12.2021 00:15  -3.7  0.00 0
27.12.2021 00:30  -3.9  0.00 1
27.12.2021 01:15  -4.2  0.25 1
27.12.2021 24:00  -2.0  0.10 0
";

fn write_fixture(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn reads_canonical_file() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "2021-12-27.txt", CANONICAL);

    let record = read_day(&path, HeaderMode::Embedded).unwrap();
    assert_eq!(record.location_id(), 4);
    assert_eq!(record.location_name(), "Bretnig");
    assert_eq!(record.comment(), "frosty");
    assert_eq!(record.date().to_string(), "27.12.2021");
    assert_eq!(record.columns().len(), 3);
    assert_eq!(record.columns()[1].kind, ColumnKind::Rain);
    assert_eq!(record.columns()[2].name, "Heizung");

    // Populated slots: 0, 1, 4 and 95 (24:00 in slot-end mode).
    assert!(record.raw_line(0).is_some());
    assert!(record.raw_line(1).is_some());
    assert!(record.raw_line(4).is_some());
    assert!(record.raw_line(95).is_some());
    assert_eq!(record.missing_slots(), 92);
    assert_eq!(record.missing_runs(), 2);
    assert_eq!(record.last_slot(), 95);
    assert_eq!(record.invalid_values(), 0);

    assert_eq!(record.decode_value(0, 0), Some(-37));
    assert_eq!(record.decode_value(4, 1), Some(25));
    assert_eq!(record.decode_value(1, 2), Some(1));
}

#[test]
fn verbatim_roundtrip_reproduces_exact_text() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "in.txt", CANONICAL);
    let record = read_day(&path, HeaderMode::Embedded).unwrap();

    let out = dir.path().join("out.txt");
    write_day(&out, &record, WriteMode::Verbatim).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), CANONICAL);
}

#[test]
fn reassemble_roundtrip_preserves_decoded_values() {
    let dir = TempDir::new().unwrap();
    // Same values as the canonical file but with drifting raw formatting.
    let messy = CANONICAL
        .replace("  -3.7  0.00 0", " -3.7 0.00  0")
        .replace("  -2.0  0.10 0", "    -2.0 0.10 0");
    let path = write_fixture(&dir, "in.txt", &messy);
    let record = read_day(&path, HeaderMode::Embedded).unwrap();

    let out = dir.path().join("out.txt");
    write_day(&out, &record, WriteMode::Reassemble).unwrap();

    // Canonical formatting is restored exactly.
    assert_eq!(fs::read_to_string(&out).unwrap(), CANONICAL);

    let reread = read_day(&out, HeaderMode::Embedded).unwrap();
    for column in 0..record.columns().len() {
        for slot in 0..96 {
            assert_eq!(
                record.decode_value(slot, column),
                reread.decode_value(slot, column),
                "slot {slot} column {column}"
            );
        }
    }
}

#[test]
fn reassemble_copies_undecodable_tokens_through() {
    let dir = TempDir::new().unwrap();
    let broken = CANONICAL.replace("  -3.9  0.00 1", " xx.x 0.00 1");
    let path = write_fixture(&dir, "in.txt", &broken);
    let record = read_day(&path, HeaderMode::Embedded).unwrap();
    assert_eq!(record.invalid_values(), 1);

    let out = dir.path().join("out.txt");
    write_day(&out, &record, WriteMode::Reassemble).unwrap();
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("27.12.2021 00:30 xx.x  0.00 1"), "{text}");
}

#[test]
fn headerless_file_reads_through_profile() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "bare.txt",
        "27.12.2021 00:15 -3.7 0.00\n27.12.2021 00:30 -3.9 0.05\n",
    );

    let profile = bretnig();
    let record = read_day(&path, HeaderMode::Profile(&profile)).unwrap();
    assert_eq!(record.location_id(), 4);
    assert_eq!(record.time_mode().number(), 1);
    assert_eq!(record.date().to_string(), "27.12.2021");
    assert_eq!(record.columns().len(), 2);
    assert_eq!(record.decode_value(0, 0), Some(-37));
    assert_eq!(record.decode_value(1, 1), Some(5));
    assert_eq!(record.missing_slots(), 94);
}

#[test]
fn missing_file_is_an_open_error() {
    let dir = TempDir::new().unwrap();
    let err = read_day(dir.path().join("absent.txt"), HeaderMode::Embedded).unwrap_err();
    assert!(matches!(err, DayfileError::Open { .. }));
    assert_eq!(err.code(), 1);
}

#[test]
fn wrong_token_count_is_rejected() {
    let dir = TempDir::new().unwrap();
    // Three declared columns but a line with only two value tokens.
    let short = CANONICAL.replace("27.12.2021 01:15  -4.2  0.25 1", "27.12.2021 01:15  -4.2  0.25");
    let path = write_fixture(&dir, "in.txt", &short);
    let err = read_day(&path, HeaderMode::Embedded).unwrap_err();
    assert!(matches!(err, DayfileError::ValueCount { expected: 5, got: 4 }));
    assert_eq!(err.code(), 11);
}

#[test]
fn out_of_order_lines_are_rejected() {
    let dir = TempDir::new().unwrap();
    let swapped = CANONICAL.replace(
        "27.12.2021 00:15  -3.7  0.00 0\n27.12.2021 00:30  -3.9  0.00 1",
        "27.12.2021 00:30  -3.9  0.00 1\n27.12.2021 00:15  -3.7  0.00 0",
    );
    let path = write_fixture(&dir, "in.txt", &swapped);
    let err = read_day(&path, HeaderMode::Embedded).unwrap_err();
    assert!(matches!(err, DayfileError::LineOrder));
    assert_eq!(err.code(), 14);
}

#[test]
fn duplicate_slot_is_a_line_order_error() {
    let dir = TempDir::new().unwrap();
    let doubled = CANONICAL.replace(
        "27.12.2021 00:30  -3.9  0.00 1",
        "27.12.2021 00:15  -3.9  0.00 1",
    );
    let path = write_fixture(&dir, "in.txt", &doubled);
    assert_eq!(
        read_day(&path, HeaderMode::Embedded).unwrap_err().code(),
        14
    );
}

#[test]
fn wrong_date_in_data_line_is_rejected() {
    let dir = TempDir::new().unwrap();
    let drifted = CANONICAL.replace(
        "27.12.2021 01:15  -4.2  0.25 1",
        "28.12.2021 01:15  -4.2  0.25 1",
    );
    let path = write_fixture(&dir, "in.txt", &drifted);
    let err = read_day(&path, HeaderMode::Embedded).unwrap_err();
    assert!(matches!(err, DayfileError::InvalidDateOrTime));
    assert_eq!(err.code(), 13);
}

#[test]
fn invalid_time_mode_is_rejected() {
    let dir = TempDir::new().unwrap();
    let bad = CANONICAL.replace("TimeMode = 1", "TimeMode = 2");
    let path = write_fixture(&dir, "in.txt", &bad);
    let err = read_day(&path, HeaderMode::Embedded).unwrap_err();
    assert_eq!(err.code(), 6);
    assert_eq!(
        err.to_string(),
        "first header part: invalid time mode: 2 (must be 0 or 1)"
    );
}

#[test]
fn unknown_column_kind_is_rejected() {
    let dir = TempDir::new().unwrap();
    let bad = CANONICAL.replace("Column02 = 2, RAIN, \"Regen\"", "Column02 = 2, WIND, \"Wind\"");
    let path = write_fixture(&dir, "in.txt", &bad);
    assert_eq!(read_day(&path, HeaderMode::Embedded).unwrap_err().code(), 8);
}

#[test]
fn duplicate_column_id_is_rejected() {
    let dir = TempDir::new().unwrap();
    let bad = CANONICAL.replace("Column02 = 2, RAIN, \"Regen\"", "Column02 = 1, RAIN, \"Regen\"");
    let path = write_fixture(&dir, "in.txt", &bad);
    assert_eq!(
        read_day(&path, HeaderMode::Embedded).unwrap_err().code(),
        10
    );
}

#[test]
fn misnumbered_column_is_rejected() {
    let dir = TempDir::new().unwrap();
    let bad = CANONICAL.replace("Column03 = 3, EVNT", "Column04 = 3, EVNT");
    let path = write_fixture(&dir, "in.txt", &bad);
    assert_eq!(read_day(&path, HeaderMode::Embedded).unwrap_err().code(), 7);
}

#[test]
fn empty_file_is_unexpected_eof() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "in.txt", "");
    let err = read_day(&path, HeaderMode::Embedded).unwrap_err();
    assert!(matches!(err, DayfileError::UnexpectedEof));
    assert_eq!(err.code(), 4);
}

#[test]
fn header_without_data_is_unexpected_eof() {
    let dir = TempDir::new().unwrap();
    let header_only = CANONICAL
        .lines()
        .take(9)
        .collect::<Vec<_>>()
        .join("\n");
    let path = write_fixture(&dir, "in.txt", &header_only);
    assert_eq!(read_day(&path, HeaderMode::Embedded).unwrap_err().code(), 4);
}

#[test]
fn high_bit_bytes_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("in.txt");
    let mut bytes = CANONICAL.as_bytes().to_vec();
    bytes[20] = 0xb0;
    fs::write(&path, bytes).unwrap();
    assert_eq!(read_day(&path, HeaderMode::Embedded).unwrap_err().code(), 2);
}

#[test]
fn blank_lines_and_tabs_are_tolerated() {
    let dir = TempDir::new().unwrap();
    let padded = CANONICAL
        .replace(
            "-------------------------------------------------\nColumn01",
            "-------------------------------------------------\n\nColumn01",
        )
        .replace("27.12.2021 00:30  -3.9", "27.12.2021\t00:30  -3.9");
    let path = write_fixture(&dir, "in.txt", &padded);
    let record = read_day(&path, HeaderMode::Embedded).unwrap();
    assert_eq!(record.decode_value(1, 0), Some(-39));
}
