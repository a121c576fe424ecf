//! Rewrite command: read one day file and write it back out.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use aeolus_dayfile::{read_day, write_day, HeaderMode, Profile, WriteMode};

use crate::cli::RewriteArgs;
use crate::config;

/// Run the rewrite pipeline on a single day file.
pub fn run(args: RewriteArgs) -> Result<()> {
    let _cmd = info_span!("rewrite").entered();

    let profile: Option<Profile> = args
        .profile
        .as_deref()
        .map(|name| config::resolve_profile(name, args.profiles.as_deref()))
        .transpose()?;
    let header = match &profile {
        Some(profile) => HeaderMode::Profile(profile),
        None => HeaderMode::Embedded,
    };

    let record = read_day(&args.input, header)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    info!(
        date = %record.date(),
        columns = record.columns().len(),
        missing = record.missing_slots(),
        "day file read"
    );

    let mode = if args.verbatim {
        WriteMode::Verbatim
    } else {
        WriteMode::Reassemble
    };
    write_day(&args.output, &record, mode)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!(
        "{}: {} line(s) written to {}",
        record.date(),
        96 - record.missing_slots(),
        args.output.display()
    );
    Ok(())
}
