//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod check;
pub mod settings;
pub mod watch;

pub use check::run_check;
pub use settings::run_config;
pub use watch::run_watch;

use crate::config::Config;
use crate::settings::FileConfigStore;

/// Open the settings store named by the configuration
pub(crate) fn open_store(config: &Config) -> FileConfigStore {
    match &config.general.settings_path {
        Some(path) => FileConfigStore::new(path),
        None => FileConfigStore::at_default_path(),
    }
}
