//! Monitoring loop
//!
//! Polls a snapshot source at the configured cadence, applies settings
//! updates between ticks and drives the alert service.

use crate::alerts::Alert;
use crate::error::AppError;
use crate::services::AlertService;
use crate::settings::SettingsWatcher;
use crate::source::SnapshotSource;

use std::time::Duration;

/// Configuration for the monitor
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Interval between ticks; `None` follows the settings' refresh interval
    pub interval: Option<Duration>,
    /// Whether to exit after one tick
    pub single_use: bool,
    /// Whether to retry when the source fails
    pub retry: bool,
    /// Interval between retries
    pub retry_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: None,
            single_use: false,
            retry: true,
            retry_interval: Duration::from_secs(10),
        }
    }
}

/// Monitoring loop
pub struct Monitor {
    config: MonitorConfig,
    service: AlertService,
    watcher: Option<SettingsWatcher>,
}

impl Monitor {
    /// Create a new monitor around an alert service
    pub fn new(config: MonitorConfig, service: AlertService) -> Self {
        Self {
            config,
            service,
            watcher: None,
        }
    }

    /// Builder: follow settings changes reported by a watcher
    pub fn with_watcher(mut self, watcher: SettingsWatcher) -> Self {
        self.watcher = Some(watcher);
        self
    }

    /// Execute a single tick
    ///
    /// Pending settings updates are applied first, as one swap.
    pub fn tick<S: SnapshotSource + ?Sized>(&mut self, source: &S) -> Result<Vec<Alert>, AppError> {
        if let Some(settings) = self.watcher.as_ref().and_then(|w| w.latest()) {
            self.service.apply_settings(settings);
        }

        let snapshot = source.read()?;
        Ok(self.service.tick(&snapshot))
    }

    /// Run the monitoring loop
    pub fn run<S: SnapshotSource + ?Sized>(&mut self, source: &S) -> Result<(), AppError> {
        log::info!(
            "Monitoring {} (interval: {:?})",
            source.describe(),
            self.interval()
        );

        loop {
            match self.tick(source) {
                Ok(raised) => {
                    log::debug!(
                        "Tick complete: {} raised, {} live",
                        raised.len(),
                        self.service.alerts().len()
                    );
                }
                Err(e) => {
                    log::error!("Monitoring tick failed: {}", e);
                    if self.config.retry && !self.config.single_use {
                        log::info!("Retrying in {:?}...", self.config.retry_interval);
                        std::thread::sleep(self.config.retry_interval);
                        continue;
                    }
                    return Err(e);
                }
            }

            if self.config.single_use {
                log::info!("Single-use mode: exiting after one tick");
                break;
            }

            std::thread::sleep(self.interval());
        }

        Ok(())
    }

    /// Current tick interval
    pub fn interval(&self) -> Duration {
        self.config.interval.unwrap_or_else(|| {
            Duration::from_secs(self.service.settings().refresh_interval.max(1))
        })
    }

    /// Alert service driven by this monitor
    pub fn service(&self) -> &AlertService {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::NotificationManager;
    use crate::domain::ParameterSnapshot;
    use crate::mock::ScriptedSource;
    use crate::settings::{MemoryConfigStore, ThresholdConfig};
    use serde_json::json;
    use std::sync::Arc;

    fn quiet_service() -> AlertService {
        AlertService::new(ThresholdConfig::default(), NotificationManager::new())
    }

    fn healthy() -> ParameterSnapshot {
        ParameterSnapshot::new(25.5, 8.2, 1.025, 200.0)
    }

    #[test]
    fn test_monitor_config_default() {
        let config = MonitorConfig::default();
        assert_eq!(config.interval, None);
        assert!(!config.single_use);
        assert!(config.retry);
    }

    #[test]
    fn test_interval_follows_settings() {
        let monitor = Monitor::new(MonitorConfig::default(), quiet_service());
        assert_eq!(monitor.interval(), Duration::from_secs(3));

        let monitor = Monitor::new(
            MonitorConfig {
                interval: Some(Duration::from_millis(500)),
                ..MonitorConfig::default()
            },
            quiet_service(),
        );
        assert_eq!(monitor.interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_tick_raises_alerts() {
        let mut monitor = Monitor::new(MonitorConfig::default(), quiet_service());
        let source = ScriptedSource::new(vec![Ok(healthy().with_temperature(23.0))]);

        let raised = monitor.tick(&source).unwrap();
        assert_eq!(raised.len(), 1);
        assert_eq!(monitor.service().alerts().len(), 1);
    }

    #[test]
    fn test_single_use_run() {
        let config = MonitorConfig {
            single_use: true,
            ..MonitorConfig::default()
        };
        let mut monitor = Monitor::new(config, quiet_service());
        let source = ScriptedSource::new(vec![Ok(healthy().with_ph(9.0))]);

        monitor.run(&source).unwrap();
        assert_eq!(source.reads(), 1);
        assert_eq!(monitor.service().alerts()[0].condition_key, "ph-high");
    }

    #[test]
    fn test_source_failure_without_retry() {
        let config = MonitorConfig {
            retry: false,
            ..MonitorConfig::default()
        };
        let mut monitor = Monitor::new(config, quiet_service());
        let source = ScriptedSource::new(vec![Err("device offline".to_string())]);

        assert!(matches!(monitor.run(&source), Err(AppError::Snapshot(_))));
    }

    #[test]
    fn test_retry_then_recover() {
        let config = MonitorConfig {
            interval: Some(Duration::from_millis(1)),
            retry: true,
            retry_interval: Duration::from_millis(1),
            ..MonitorConfig::default()
        };
        let mut monitor = Monitor::new(config, quiet_service());
        let source = ScriptedSource::new(vec![
            Err("timeout".to_string()),
            Ok(healthy().with_tds(900.0)),
            Err("end of script".to_string()),
        ]);

        // The loop keeps retrying; drive it tick by tick instead
        assert!(monitor.tick(&source).is_err());
        assert_eq!(monitor.tick(&source).unwrap().len(), 1);
        assert_eq!(monitor.service().alerts()[0].condition_key, "tds-high");
    }

    #[test]
    fn test_settings_update_applied_before_tick() {
        let store = Arc::new(MemoryConfigStore::new());
        let watcher = SettingsWatcher::spawn(
            store.clone(),
            ThresholdConfig::default(),
            Duration::from_millis(20),
        );
        let mut monitor =
            Monitor::new(MonitorConfig::default(), quiet_service()).with_watcher(watcher);

        let warmish = healthy().with_temperature(26.5);
        let source = ScriptedSource::new(vec![Ok(warmish), Ok(warmish)]);
        assert!(monitor.tick(&source).unwrap().is_empty());

        store.set_raw(json!({ "tempMax": 26.0 }));
        std::thread::sleep(Duration::from_millis(300));

        let raised = monitor.tick(&source).unwrap();
        assert_eq!(raised.len(), 1);
        assert_eq!(monitor.service().settings().temp_max, 26.0);
    }
}
