//! Command-line arguments and their mapping onto `Settings`.

use std::path::PathBuf;

use clap::Parser;
use sstv_core::config::Settings;
use sstv_core::logging::LogLevel;
use sstv_core::models::ObservationStatus;

/// Download SatNOGS SSTV images and delete the ones that are just static.
#[derive(Parser, Debug)]
#[command(name = "sstv-curator", version, about, long_about = None)]
pub struct Args {
    /// TOML config file (created with defaults if missing)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// NORAD catalog ID of the satellite
    #[arg(long)]
    pub satellite: Option<u32>,

    /// SatNOGS ground station ID
    #[arg(long)]
    pub station: Option<u32>,

    /// Observation status filter (good, bad, unknown, failed, future)
    #[arg(long)]
    pub status: Option<ObservationStatus>,

    /// Transmitter mode filter
    #[arg(long)]
    pub mode: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Maximum number of observations to request
    #[arg(long)]
    pub limit: Option<u32>,

    /// Laplacian variance at or below which an image is deleted
    #[arg(long, allow_negative_numbers = true)]
    pub threshold: Option<f64>,

    /// Directory for downloaded images
    #[arg(long)]
    pub image_dir: Option<String>,

    /// Save all images in one directory instead of one per observation
    #[arg(long, default_value_t = false)]
    pub flat: bool,

    /// Observations endpoint
    #[arg(long)]
    pub api_url: Option<String>,

    /// Debug-level diagnostics
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Overlay explicitly given flags on top of `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        let query = &mut settings.query;
        if let Some(id) = self.satellite {
            query.satellite_id = id;
        }
        if let Some(id) = self.station {
            query.ground_station_id = id;
        }
        if let Some(status) = self.status {
            query.status = status;
        }
        if let Some(ref mode) = self.mode {
            query.transmitter_mode = mode.clone();
        }
        if let Some(ref start) = self.start {
            query.start = Some(start.clone());
        }
        if let Some(ref end) = self.end {
            query.end = Some(end.clone());
        }
        if let Some(limit) = self.limit {
            query.limit = limit;
        }

        if let Some(threshold) = self.threshold {
            settings.classifier.threshold = threshold;
        }
        if let Some(ref dir) = self.image_dir {
            settings.paths.image_dir = dir.clone();
        }
        if self.flat {
            settings.paths.group_by_observation = false;
        }
        if let Some(ref url) = self.api_url {
            settings.api.base_url = url.clone();
        }
        if self.verbose {
            settings.logging.level = LogLevel::Debug;
        }
    }
}
