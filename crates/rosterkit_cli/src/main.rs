//! `rosterkit` binary.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use rosterkit_cli::cli::{Cli, LogFormatArg, LogLevelArg};
use rosterkit_cli::logging::{LogConfig, LogFormat, init_logging};
use rosterkit_merge::{ReportMerge, run_merge};
use tracing::info;
use tracing::level_filters::LevelFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let log_config = log_config_from_cli(&cli);
    if let Err(err) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(report) => {
            info!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ReportMerge> {
    let config = cli.to_run_config();
    run_merge(&config).with_context(|| {
        format!(
            "failed to merge {} and {} into {}",
            config.path_file_ta_summary.display(),
            config.path_file_course_summary.display(),
            config.path_file_out.display()
        )
    })
}

/// Explicit `--log-level` wins over `-v/-q`; `RUST_LOG` applies only when neither is given.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.with_ansi = io::stderr().is_terminal();
    config
}
