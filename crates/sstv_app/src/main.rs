//! SSTV Curator binary entry point.
//!
//! Exits non-zero only when the configuration (including the date range)
//! is unusable. Network and download failures are logged and the process
//! exits normally.

mod args;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use sstv_core::config::{ConfigManager, Settings};
use sstv_core::curator::{Curator, CuratorOptions};
use sstv_core::logging::{init_tracing, ConsoleCallback, LogConfig, RunLogger};
use sstv_core::models::ObservationQuery;
use sstv_core::network::SatnogsClient;

use crate::args::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    args.apply(&mut settings);

    init_tracing(settings.logging.level);
    tracing::info!("SSTV Curator v{} starting...", sstv_core::version());

    // Validate dates before touching the network
    let query = ObservationQuery::from_settings(&settings.query)
        .context("Invalid observation query")?;

    let logger = Arc::new(build_logger(&settings));
    if let Some(path) = logger.log_path() {
        tracing::debug!(path = %path.display(), "Writing run log");
    }

    let client = match SatnogsClient::new(&settings.api) {
        Ok(client) => client,
        Err(e) => {
            logger.error(&e.to_string());
            return Ok(());
        }
    };

    let curator = Curator::new(&client, CuratorOptions::from_settings(&settings), logger.clone());

    // A fetch failure has already been logged by the curator
    if let Ok(summary) = curator.run(&query) {
        for path in summary.retained_paths() {
            tracing::debug!(path = %path.display(), "Kept image");
        }
    }

    logger.close();
    Ok(())
}

/// Built-in defaults, or the given config file (created if missing).
fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    let Some(path) = config_path else {
        return Ok(Settings::default());
    };

    let mut manager = ConfigManager::new(path);
    manager
        .load_or_create()
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    Ok(manager.into_settings())
}

/// Console logger, plus a per-run file when enabled.
///
/// If the log file cannot be created the run continues with console output.
fn build_logger(settings: &Settings) -> RunLogger {
    let run_name = format!("run_{}", Local::now().format("%Y%m%d_%H%M%S"));
    let config = LogConfig {
        level: settings.logging.level,
        show_timestamps: settings.logging.show_timestamps,
    };

    let log_dir = settings
        .logging
        .log_to_file
        .then(|| PathBuf::from(&settings.paths.logs_folder));

    match RunLogger::new(&run_name, log_dir.as_deref(), config.clone(), Some(console())) {
        Ok(logger) => logger,
        Err(e) => {
            tracing::warn!(error = %e, "Could not create run log file, logging to console only");
            RunLogger::new(run_name, None, config, Some(console()))
                .unwrap_or_else(|_| RunLogger::silent())
        }
    }
}

fn console() -> ConsoleCallback {
    Box::new(|line| println!("{}", line))
}
