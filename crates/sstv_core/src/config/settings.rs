//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Every field has a serde default so partial files load cleanly.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::models::ObservationStatus;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Remote API settings.
    #[serde(default)]
    pub api: ApiSettings,

    /// Observation filter.
    #[serde(default)]
    pub query: QuerySettings,

    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Static/content classification.
    #[serde(default)]
    pub classifier: ClassifierSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Connection settings for the SatNOGS network API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Observations endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds. `None` keeps the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://network.satnogs.org/api/observations/".to_string()
}

fn default_user_agent() -> String {
    format!("sstv-curator/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Observation filter, converted into an `ObservationQuery` at startup.
///
/// Dates stay as strings here so a malformed value surfaces as a
/// `ConfigError` when the query is built, not as a TOML parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuerySettings {
    /// NORAD catalog ID of the satellite (25544 is the ISS).
    #[serde(default = "default_satellite_id")]
    pub satellite_id: u32,

    /// SatNOGS ground station ID.
    #[serde(default = "default_ground_station_id")]
    pub ground_station_id: u32,

    /// Vetting status filter.
    #[serde(default)]
    pub status: ObservationStatus,

    /// Transmitter mode filter.
    #[serde(default = "default_transmitter_mode")]
    pub transmitter_mode: String,

    /// Inclusive start date, `YYYY-MM-DD`.
    #[serde(default)]
    pub start: Option<String>,

    /// Inclusive end date, `YYYY-MM-DD`.
    #[serde(default)]
    pub end: Option<String>,

    /// Maximum number of observations requested.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_satellite_id() -> u32 {
    25544
}

fn default_ground_station_id() -> u32 {
    2433
}

fn default_transmitter_mode() -> String {
    "SSTV".to_string()
}

fn default_limit() -> u32 {
    10
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            satellite_id: default_satellite_id(),
            ground_station_id: default_ground_station_id(),
            status: ObservationStatus::default(),
            transmitter_mode: default_transmitter_mode(),
            start: None,
            end: None,
            limit: default_limit(),
        }
    }
}

/// Path configuration for images and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Working directory for downloaded images.
    #[serde(default = "default_image_dir")]
    pub image_dir: String,

    /// Folder for run log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Store each observation's payloads in their own subdirectory.
    #[serde(default = "default_true")]
    pub group_by_observation: bool,
}

fn default_image_dir() -> String {
    "satnogs_images".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            image_dir: default_image_dir(),
            logs_folder: default_logs_folder(),
            group_by_observation: true,
        }
    }
}

/// Classification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Laplacian variance at or below which an image is static.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    crate::classify::DEFAULT_THRESHOLD
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default diagnostic level (overridden by `RUST_LOG`).
    #[serde(default)]
    pub level: LogLevel,

    /// Write a log file per run into `paths.logs_folder`.
    #[serde(default = "default_true")]
    pub log_to_file: bool,

    /// Prefix run log lines with a timestamp.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            log_to_file: true,
            show_timestamps: true,
        }
    }
}
