//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use rosterkit_merge::SpecMergeRunConfig;

#[derive(Parser, Debug)]
#[command(
    name = "rosterkit",
    version,
    about = "Merge a TA roster with course assignments into one summary workbook",
    long_about = "Join the TA summary workbook (one row per TA) with the course summary \
                  workbook (up to 11 assignments per course row) on Banner ID and write \
                  one formatted summary workbook.\n\n\
                  Each path may also be given through its environment variable."
)]
pub struct Cli {
    /// Course summary workbook (assignments).
    #[arg(long = "course-summary", value_name = "PATH", env = "ROSTERKIT_COURSE_SUMMARY")]
    pub course_summary: PathBuf,

    /// TA summary workbook (roster).
    #[arg(long = "ta-summary", value_name = "PATH", env = "ROSTERKIT_TA_SUMMARY")]
    pub ta_summary: PathBuf,

    /// Output workbook; replaced when it exists.
    #[arg(short = 'o', long = "output", value_name = "PATH", env = "ROSTERKIT_OUTPUT")]
    pub output: PathBuf,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,
}

impl Cli {
    /// Paths of this invocation as a run configuration.
    pub fn to_run_config(&self) -> SpecMergeRunConfig {
        SpecMergeRunConfig {
            path_file_course_summary: self.course_summary.clone(),
            path_file_ta_summary: self.ta_summary.clone(),
            path_file_out: self.output.clone(),
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
