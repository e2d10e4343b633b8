//! Logging infrastructure for SSTV Curator.
//!
//! Two layers:
//! - `tracing` diagnostics for the library internals (HTTP requests, scores)
//! - `RunLogger` for the human-readable progress lines of a run, sent to
//!   the console and optionally to a per-run log file
//!
//! # Example
//!
//! ```no_run
//! use sstv_core::logging::{LogConfig, MessagePrefix, RunLogger};
//!
//! let logger = RunLogger::new("run", None, LogConfig::default(), None).unwrap();
//! logger.phase("Fetch");
//! logger.tagged(MessagePrefix::Content, "satnogs_images/123/data_123.png");
//! ```

mod run_logger;
mod types;

pub use run_logger::RunLogger;
pub use types::{ConsoleCallback, LogConfig, LogLevel, MessagePrefix};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize global tracing subscriber for application-wide logging.
///
/// This sets up a subscriber that:
/// - Respects RUST_LOG environment variable
/// - Falls back to the provided default level
/// - Outputs to stderr
///
/// Should be called once at application startup.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(filter)
        .init();
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}
