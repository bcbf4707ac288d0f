//! CLI argument definitions for the cohort survival tool.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use surv_model::SchemaProfile;

#[derive(Parser)]
#[command(
    name = "cohort-survival",
    version,
    about = "Kaplan-Meier survival curves and log-rank tests for patient cohorts",
    long_about = "Estimate Kaplan-Meier survival curves for every cohort in \
                  <WORKDIR>/input.tsv.\n\n\
                  Writes curve and censored-subject tables, plus a log-rank \
                  comparison when more than one cohort is present."
)]
pub struct Cli {
    /// Working directory containing input.tsv (and options.json).
    #[arg(value_name = "WORKDIR")]
    pub workdir: PathBuf,

    /// Input schema generation.
    #[arg(long, value_enum, default_value = "progression-survival")]
    pub profile: ProfileArg,

    /// Output directory for result files (default: <WORKDIR>).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Allow subject identifiers in log output.
    #[arg(long = "log-data")]
    pub log_data: bool,
}

/// CLI schema profile choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    VitalStatus,
    ProgressionSurvival,
    Donor,
}

impl From<ProfileArg> for SchemaProfile {
    fn from(value: ProfileArg) -> Self {
        match value {
            ProfileArg::VitalStatus => SchemaProfile::VitalStatus,
            ProfileArg::ProgressionSurvival => SchemaProfile::ProgressionSurvival,
            ProfileArg::Donor => SchemaProfile::Donor,
        }
    }
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
