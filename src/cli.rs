use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Aeolus weather-station day-file toolkit.
#[derive(Parser)]
#[command(
    name = "aeolus",
    version,
    about = "Check, rewrite and aggregate weather-station day files"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Check day files over a date range and report diagnostics.
    Check(CheckArgs),
    /// Read one day file and write it back out.
    Rewrite(RewriteArgs),
    /// Assemble a month of day files and print per-column aggregates.
    Month(MonthArgs),
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args)]
pub struct CheckArgs {
    /// First date to check (d.m.yyyy).
    #[arg(short, long)]
    pub start: String,

    /// Last date to check (d.m.yyyy); defaults to the start date.
    #[arg(short, long)]
    pub end: Option<String>,

    /// Directory holding the day files.
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Station profile for header-less files.
    #[arg(long)]
    pub profile: Option<String>,

    /// TOML file with additional station profiles.
    #[arg(long)]
    pub profiles: Option<PathBuf>,

    /// Only report days with problems.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `rewrite` subcommand.
#[derive(clap::Args)]
pub struct RewriteArgs {
    /// Input day file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output day file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Station profile for header-less input.
    #[arg(long)]
    pub profile: Option<String>,

    /// TOML file with additional station profiles.
    #[arg(long)]
    pub profiles: Option<PathBuf>,

    /// Copy measurement lines through unchanged instead of re-encoding.
    #[arg(long)]
    pub verbatim: bool,
}

/// Arguments for the `month` subcommand.
#[derive(clap::Args)]
pub struct MonthArgs {
    /// Year of the month to assemble.
    #[arg(short, long)]
    pub year: u16,

    /// Month to assemble (1-12).
    #[arg(short, long)]
    pub month: u8,

    /// Directory holding the day files.
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Station profile for header-less files.
    #[arg(long)]
    pub profile: Option<String>,

    /// TOML file with additional station profiles.
    #[arg(long)]
    pub profiles: Option<PathBuf>,
}
