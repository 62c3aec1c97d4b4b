//! CLI argument definitions for the shipment tracking ETL.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use shiptrack_model::{DEFAULT_TIMEZONE, TargetTimezone};

#[derive(Parser)]
#[command(
    name = "shiptrack",
    version,
    about = "Flatten carrier tracking exports and summarize delivery performance",
    long_about = "Flatten a nested JSON shipment tracking export into a CSV table.\n\n\
                  Timestamps are converted into a single target timezone, delivery\n\
                  attempts are counted from scan events, and mean/median/mode are\n\
                  reported for transit days and delivery attempts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Process a tracking export and write the flat table and summary.
    Process(ProcessArgs),

    /// List the flat table columns.
    Columns,
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Path to the JSON tracking export.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory for generated files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "outputs")]
    pub output_dir: PathBuf,

    /// Target timezone: an IANA name (Asia/Kolkata), UTC, or an offset (+05:30).
    #[arg(long = "timezone", value_name = "TZ", default_value = DEFAULT_TIMEZONE)]
    pub timezone: TargetTimezone,

    /// Abort on the first malformed record instead of skipping it.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Run every stage and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
