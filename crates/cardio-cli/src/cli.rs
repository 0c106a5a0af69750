//! CLI argument definitions for the survey cleaner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cardio",
    version,
    about = "Clean cardiovascular survey data before risk modelling",
    long_about = "Repair blood pressure, height and weight entry errors in cardiovascular\n\
                  survey data. Group means learned from a reference set fill values that\n\
                  cannot be repaired."
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

    /// Allow record values in trace logs (survey rows are health data).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fit the correctors on a reference set and clean an input file.
    Clean(CleanArgs),

    /// Fit the correctors on a reference set and print the group means.
    Stats(StatsArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Reference survey used to learn imputation means.
    #[arg(long = "reference", value_name = "CSV")]
    pub reference: PathBuf,

    /// Survey file to clean.
    #[arg(long = "input", value_name = "CSV")]
    pub input: PathBuf,

    /// Where to write the cleaned survey.
    #[arg(long = "output", value_name = "CSV")]
    pub output: PathBuf,

    /// JSON file overriding correction thresholds.
    #[arg(long = "config", value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// CSV field separator for all files.
    #[arg(long = "separator", value_name = "CHAR", default_value_t = ',')]
    pub separator: char,

    /// Convert `age` from days to years in the output.
    #[arg(long = "age-years")]
    pub age_years: bool,

    /// Add an `ap` column holding `ap_hi + ap_lo`.
    #[arg(long = "pressure-sum")]
    pub pressure_sum: bool,

    /// Write the correction counts as JSON.
    #[arg(long = "report", value_name = "JSON")]
    pub report: Option<PathBuf>,
}

#[derive(Parser)]
pub struct StatsArgs {
    /// Reference survey used to learn imputation means.
    #[arg(long = "reference", value_name = "CSV")]
    pub reference: PathBuf,

    /// JSON file overriding correction thresholds.
    #[arg(long = "config", value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// CSV field separator.
    #[arg(long = "separator", value_name = "CHAR", default_value_t = ',')]
    pub separator: char,
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
