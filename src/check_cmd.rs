//! Check command: read day files over a date range and report diagnostics.

use anyhow::{bail, Context, Result};
use tracing::info_span;

use aeolus_calendar::Date;
use aeolus_dayfile::{read_day, HeaderMode, Profile};

use crate::cli::CheckArgs;
use crate::config;

/// Run the check pipeline over the requested date range.
pub fn run(args: CheckArgs) -> Result<()> {
    let _cmd = info_span!("check").entered();

    let start = Date::parse(&args.start)
        .with_context(|| format!("invalid start date: {}", args.start))?;
    let end = match &args.end {
        Some(end) => Date::parse(end).with_context(|| format!("invalid end date: {end}"))?,
        None => start,
    };
    if end < start {
        bail!("end date {end} lies before start date {start}");
    }

    let profile: Option<Profile> = args
        .profile
        .as_deref()
        .map(|name| config::resolve_profile(name, args.profiles.as_deref()))
        .transpose()?;
    let header = match &profile {
        Some(profile) => HeaderMode::Profile(profile),
        None => HeaderMode::Embedded,
    };

    if !args.quiet {
        println!("{:<12} {:>8} {:>6} {:>8}", "date", "missing", "runs", "invalid");
    }

    let mut checked = 0usize;
    let mut problems = 0usize;
    let mut date = start;
    loop {
        let path = args.path.join(format!("{}.txt", date.file_stem()));
        checked += 1;

        match read_day(&path, header) {
            Ok(record) => {
                let missing = record.missing_slots();
                let runs = record.missing_runs();
                let invalid = record.invalid_values();
                let clean = missing == 0 && invalid == 0;
                if !clean {
                    problems += 1;
                }
                if !args.quiet || !clean {
                    println!("{:<12} {:>8} {:>6} {:>8}", date.to_string(), missing, runs, invalid);
                }
            }
            Err(e) => {
                problems += 1;
                println!("{:<12} error {}: {e}", date.to_string(), e.code());
            }
        }

        if date == end {
            break;
        }
        date = date.next().context("date range exceeds the calendar bounds")?;
    }

    println!("{checked} day(s) checked, {problems} with problems");
    if problems > 0 {
        bail!("{problems} day(s) with problems");
    }
    Ok(())
}
