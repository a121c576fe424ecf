//! Month command: assemble a month of day files and print aggregates.

use anyhow::{Context, Result};
use tracing::info_span;

use aeolus_dayfile::{read_month, ColumnKind, HeaderMode, MonthRecord, MonthSeries, Profile};
use aeolus_values::{format_slot, format_temperature, Width};

use crate::cli::MonthArgs;
use crate::config;

/// Run the month aggregation pipeline.
pub fn run(args: MonthArgs) -> Result<()> {
    let _cmd = info_span!("month").entered();

    let profile: Option<Profile> = args
        .profile
        .as_deref()
        .map(|name| config::resolve_profile(name, args.profiles.as_deref()))
        .transpose()?;
    let header = match &profile {
        Some(profile) => HeaderMode::Profile(profile),
        None => HeaderMode::Embedded,
    };

    let month = read_month(&args.path, args.year, args.month, header)
        .with_context(|| format!("failed to assemble {:02}.{}", args.month, args.year))?;

    println!(
        "{} \"{}\", {:02}.{}: {} of {} day(s) present",
        month.location_id(),
        month.location_name(),
        args.month,
        args.year,
        month.valid_days(),
        month.days_in_month()
    );

    for column in first_valid_columns(&month) {
        let (kind, id, name) = column;
        match MonthSeries::extract(&month, kind, id) {
            Ok(series) => print_aggregates(&month, kind, id, &name, &series),
            Err(e) => println!("  {name} ({} {id}): {e}", kind.token()),
        }
    }
    Ok(())
}

/// Returns the column set of the earliest valid day.
fn first_valid_columns(month: &MonthRecord) -> Vec<(ColumnKind, u32, String)> {
    for day in 1..=month.days_in_month() {
        if let Some(record) = month.day(day) {
            return record
                .columns()
                .iter()
                .map(|c| (c.kind, c.id, c.name.clone()))
                .collect();
        }
    }
    Vec::new()
}

fn print_aggregates(
    month: &MonthRecord,
    kind: ColumnKind,
    id: u32,
    name: &str,
    series: &MonthSeries,
) {
    println!("  {name} ({} {id}):", kind.token());
    match kind {
        ColumnKind::Temperature => {
            if let Some(avg) = series.average() {
                if let Some(text) = format_temperature(Width::Variable, avg) {
                    println!("    average {text}");
                }
            }
            if let Some((day, slot)) = series.day_of_max() {
                print_extreme(month, series, "maximum", day, slot);
            }
            if let Some((day, slot)) = series.day_of_min() {
                print_extreme(month, series, "minimum", day, slot);
            }
        }
        ColumnKind::Rain => {
            if let Some(sum) = series.sum() {
                println!("    total   {}.{:02} mm", sum / 100, sum % 100);
            }
        }
        ColumnKind::Event => {
            if let Some(active) = series.sum() {
                println!("    active  {active} slot(s)");
            }
        }
    }
}

fn print_extreme(month: &MonthRecord, series: &MonthSeries, label: &str, day: u8, slot: usize) {
    let value = series
        .day(day)
        .and_then(|s| s.get(slot))
        .and_then(|v| format_temperature(Width::Variable, v));
    let time = format_slot(month.time_mode(), slot, false);
    if let (Some(value), Some(time)) = (value, time) {
        println!("    {label} {value} on day {day} at {time}");
    }
}
