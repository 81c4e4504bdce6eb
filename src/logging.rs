//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the filter:
//! 1. `--log-level` flag (if provided)
//! 2. `GANTT_SCHEDULE_LOG` environment variable, in `EnvFilter` directive
//!    syntax (e.g. "debug", "gantt_schedule=trace")
//! 3. default to `info`
//!
//! Logs go to STDERR so stdout stays usable for schedule output.

use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_ENV_VAR: &str = "GANTT_SCHEDULE_LOG";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Initialise the global logging subscriber. Later calls are no-ops.
pub fn init_logging(level: Option<LogLevel>) {
    let _ = fmt()
        .with_env_filter(build_filter(level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_filter(level: Option<LogLevel>) -> EnvFilter {
    match level {
        Some(lvl) => EnvFilter::new(lvl.as_directive()),
        None => EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info")),
    }
}
