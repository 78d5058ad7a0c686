//! Tool configuration
//!
//! Handles TOML config file parsing and CLI argument merging. Threshold
//! settings are not part of this file; they live in the settings store.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::services::MonitorConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Monitoring loop settings
    pub monitor: MonitorSection,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,
    /// Settings store file (defaults to the user config directory)
    pub settings_path: Option<String>,
    /// Snapshot file written by the acquisition side
    pub snapshot_path: Option<String>,
}

/// Monitoring loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSection {
    /// Fixed tick interval; unset follows the settings' refresh interval
    pub interval_seconds: Option<u64>,
    /// Exit after one tick
    pub single_use: bool,
    /// Retry when the snapshot source fails
    pub retry: bool,
    /// Retry interval in seconds
    pub retry_interval_seconds: u64,
}

impl Default for MonitorSection {
    fn default() -> Self {
        Self {
            interval_seconds: None,
            single_use: false,
            retry: true,
            retry_interval_seconds: 10,
        }
    }
}

impl MonitorSection {
    /// Convert to the monitor's runtime configuration
    pub fn to_monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            interval: self
                .interval_seconds
                .map(|secs| Duration::from_secs(secs.max(1))),
            single_use: self.single_use,
            retry: self.retry,
            retry_interval: Duration::from_secs(self.retry_interval_seconds.max(1)),
        }
    }
}
