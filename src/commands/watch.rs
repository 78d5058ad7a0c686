//! Watch command implementation
//!
//! Runs the monitoring loop over a snapshot file, following settings
//! changes while it runs.

use crate::alerts::NotificationManager;
use crate::cli::args::{OutputFormat, WatchArgs};
use crate::cli::output::{print_output, Message};
use crate::commands::open_store;
use crate::config::{Config, ConfigBuilder};
use crate::error::{ConfigError, Result};
use crate::services::{AlertService, Monitor};
use crate::settings::{ConfigStore, SettingsWatcher, DEFAULT_POLL_INTERVAL};
use crate::source::FileSnapshotSource;

use std::sync::Arc;

/// Execute the watch command
pub fn run_watch(args: &WatchArgs, config: Config, format: OutputFormat) -> Result<()> {
    let config = apply_args(args, config);

    let snapshot_path = config.general.snapshot_path.clone().ok_or_else(|| {
        ConfigError::InvalidValue {
            key: "snapshot_path".to_string(),
            message: "no snapshot file; pass --snapshot or set general.snapshot_path".to_string(),
        }
    })?;

    let store = Arc::new(open_store(&config));
    let settings = store.load();
    log::info!("Settings store: {}", store.path().display());

    for parameter in settings.inverted_ranges() {
        log::warn!("{} minimum is above maximum; its alerts will not fire", parameter);
    }

    let monitor_config = config.monitor.to_monitor_config();
    let single_use = monitor_config.single_use;

    let service = AlertService::new(settings.clone(), NotificationManager::default());
    let watcher = SettingsWatcher::spawn(store, settings, DEFAULT_POLL_INTERVAL);
    let mut monitor = Monitor::new(monitor_config, service).with_watcher(watcher);

    monitor.run(&FileSnapshotSource::new(snapshot_path))?;

    if single_use {
        let msg = Message {
            message: format!(
                "Watch tick completed (single-use mode), {} live alert(s)",
                monitor.service().alerts().len()
            ),
            success: true,
        };
        print_output(&msg, format)?;
    }

    Ok(())
}

/// Merge command flags over the loaded configuration
fn apply_args(args: &WatchArgs, config: Config) -> Config {
    let mut builder = ConfigBuilder::from_config(config)
        .with_snapshot_path(args.snapshot.clone())
        .with_interval(args.interval);

    if args.once {
        builder = builder.with_single_use(Some(true));
    }
    if args.no_retry {
        builder = builder.with_retry(Some(false));
    }

    builder.build()
}
