//! Alert service
//!
//! Ties evaluation, the alert lifecycle and notification together around
//! the current settings. This is the surface a dashboard binds to.

use crate::alerts::{
    now_millis, Alert, AlertEvaluator, AlertKind, AlertManager, AlertManagerConfig,
    ConditionResult, NotificationManager, Timestamp,
};
use crate::domain::ParameterSnapshot;
use crate::settings::ThresholdConfig;

/// Alert service for aquarium monitoring
///
/// Operations take `&mut self`; share it behind a `Mutex` if ticks and
/// user actions come from different threads.
pub struct AlertService {
    manager: AlertManager,
    notifier: NotificationManager,
    settings: ThresholdConfig,
}

impl AlertService {
    /// Create a new alert service
    pub fn new(settings: ThresholdConfig, notifier: NotificationManager) -> Self {
        Self::with_manager_config(settings, notifier, AlertManagerConfig::default())
    }

    /// Create a service with custom cooldown/retention
    pub fn with_manager_config(
        settings: ThresholdConfig,
        notifier: NotificationManager,
        config: AlertManagerConfig,
    ) -> Self {
        warn_inverted(&settings);
        Self {
            manager: AlertManager::new(config),
            notifier,
            settings,
        }
    }

    /// Current settings
    pub fn settings(&self) -> &ThresholdConfig {
        &self.settings
    }

    /// Replace the settings as a whole
    ///
    /// Takes effect on the next tick.
    pub fn apply_settings(&mut self, settings: ThresholdConfig) {
        if settings != self.settings {
            log::debug!("Applying new settings");
            warn_inverted(&settings);
            self.settings = settings;
        }
    }

    /// Evaluate a snapshot without touching the alert list
    pub fn evaluate(&self, snapshot: &ParameterSnapshot) -> Vec<ConditionResult> {
        AlertEvaluator::evaluate(snapshot, &self.settings)
    }

    /// Run one monitoring tick at the current time
    pub fn tick(&mut self, snapshot: &ParameterSnapshot) -> Vec<Alert> {
        self.tick_at(snapshot, now_millis())
    }

    /// Run one monitoring tick at `now`
    ///
    /// Returns the newly raised alerts, which have already been dispatched
    /// to the notification channels.
    pub fn tick_at(&mut self, snapshot: &ParameterSnapshot, now: Timestamp) -> Vec<Alert> {
        let results = self.evaluate(snapshot);
        let raised = self.manager.reconcile(&results, now);

        for alert in &raised {
            self.notifier.notify(alert.kind, &alert.message, &self.settings);
        }

        raised
    }

    /// Live alerts, newest first
    pub fn alerts(&self) -> &[Alert] {
        self.manager.alerts()
    }

    /// Dismiss one alert by id
    pub fn dismiss_alert(&mut self, id: &str) {
        self.manager.dismiss(id);
    }

    /// Dismiss every alert
    pub fn clear_all_alerts(&mut self) {
        self.manager.clear_all();
    }

    /// Raise a manual alert and notify it
    pub fn add_alert(&mut self, kind: AlertKind, message: &str) -> Alert {
        self.add_alert_at(kind, message, now_millis())
    }

    /// Raise a manual alert at `now` and notify it
    pub fn add_alert_at(&mut self, kind: AlertKind, message: &str, now: Timestamp) -> Alert {
        let alert = self.manager.add_manual(kind, message, now);
        self.notifier.notify(kind, message, &self.settings);
        alert
    }
}

fn warn_inverted(settings: &ThresholdConfig) {
    for parameter in settings.inverted_ranges() {
        let (min, max) = settings.bounds(parameter);
        log::warn!(
            "{} minimum {} is above maximum {}; {} alerts are disabled until fixed",
            parameter,
            min,
            max,
            parameter
        );
    }
}
