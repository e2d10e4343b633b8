//! Configuration management for SSTV Curator.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Defaults for every missing key
//!
//! # Example
//!
//! ```no_run
//! use sstv_core::config::ConfigManager;
//!
//! let mut config = ConfigManager::new("sstv.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Image folder: {}", config.settings().paths.image_dir);
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ApiSettings, ClassifierSettings, LoggingSettings, PathSettings, QuerySettings, Settings,
};
