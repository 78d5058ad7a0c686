//! Configuration builder
//!
//! Merges configuration from files and CLI arguments.

use crate::config::{Config, ConfigFile};

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Start from an already loaded configuration
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Load configuration from a file
    pub fn with_file(mut self, path: Option<&str>) -> Self {
        let file_config = if let Some(path) = path {
            match ConfigFile::load(path) {
                Ok(cfg) => Some(cfg),
                Err(e) => {
                    log::warn!("Ignoring config file {}: {}", path, e);
                    None
                }
            }
        } else {
            ConfigFile::load_default()
        };

        if let Some(cfg) = file_config {
            self.config = cfg;
        }

        self
    }

    /// Override with CLI verbose flag
    pub fn with_verbose(mut self, verbose: Option<bool>) -> Self {
        if let Some(v) = verbose {
            self.config.general.verbose = v;
        }
        self
    }

    /// Override with CLI settings path
    pub fn with_settings_path(mut self, path: Option<String>) -> Self {
        if let Some(p) = path {
            self.config.general.settings_path = Some(p);
        }
        self
    }

    /// Override with CLI snapshot path
    pub fn with_snapshot_path(mut self, path: Option<String>) -> Self {
        if let Some(p) = path {
            self.config.general.snapshot_path = Some(p);
        }
        self
    }

    /// Override with CLI interval
    pub fn with_interval(mut self, interval: Option<u64>) -> Self {
        if let Some(i) = interval {
            self.config.monitor.interval_seconds = Some(i);
        }
        self
    }

    /// Override with CLI single-use flag
    pub fn with_single_use(mut self, single_use: Option<bool>) -> Self {
        if let Some(s) = single_use {
            self.config.monitor.single_use = s;
        }
        self
    }

    /// Override with CLI retry flag
    pub fn with_retry(mut self, retry: Option<bool>) -> Self {
        if let Some(r) = retry {
            self.config.monitor.retry = r;
        }
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
