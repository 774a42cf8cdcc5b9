//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Levels used by the library crates:
//!
//! - `warn`: units cells left unset because they are not decimals
//! - `info`: stage progress and the final run report
//! - `debug`: per-file read/write details
//!
//! Logs always go to stderr.

use std::io;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

/// Crates whose events are shown at the configured level; others stay at `warn`.
const TUP_LOG_TARGETS: [&str; 3] = ["rosterkit_cli", "rosterkit_merge", "rosterkit_io_xlsx"];

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON lines for machine parsing.
    Json,
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level for this workspace's crates.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter` when set.
    pub use_env_filter: bool,
    /// Output format.
    pub format: LogFormat,
    /// Whether to use ANSI colors.
    pub with_ansi: bool,
    /// Whether to include the module path of each event.
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::INFO,
            use_env_filter: true,
            format: LogFormat::default(),
            with_ansi: true,
            with_target: false,
        }
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: &LogConfig) -> Result<(), TryInitError> {
    let filter = build_env_filter(config);

    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(io::stderr)
                    .with_target(config.with_target),
            )
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .compact()
                    .without_time()
                    .with_writer(io::stderr)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .without_time()
                    .with_writer(io::stderr)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target),
            )
            .try_init(),
    }
}

/// Filter for `config`, honouring `RUST_LOG` when allowed and set.
pub fn build_env_filter(config: &LogConfig) -> EnvFilter {
    if config.use_env_filter
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::new(derive_filter_directives(config.level_filter))
}

fn derive_filter_directives(level_filter: LevelFilter) -> String {
    let c_level = level_filter.to_string().to_lowercase();
    let mut l_directives = vec!["warn".to_string()];
    l_directives.extend(
        TUP_LOG_TARGETS
            .iter()
            .map(|c_target| format!("{c_target}={c_level}")),
    );
    l_directives.join(",")
}
