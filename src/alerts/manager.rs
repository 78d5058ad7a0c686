//! Alert manager implementation
//!
//! Owns the live alert list. Reconciles evaluator results against it,
//! applying the per-condition cooldown, replacing instead of duplicating,
//! auto-clearing resolved conditions and capping the retained count.

use super::types::{Alert, AlertKind, ConditionResult, Timestamp};
use std::collections::HashMap;
use std::time::Duration;

/// Minimum time between two raises of the same condition
pub const COOLDOWN_WINDOW: Duration = Duration::from_secs(30);

/// Maximum number of alerts kept in the list
pub const MAX_ALERTS: usize = 20;

/// Alert manager configuration
#[derive(Debug, Clone)]
pub struct AlertManagerConfig {
    /// Cooldown between raises of one condition
    pub cooldown: Duration,
    /// Maximum number of alerts to keep
    pub max_alerts: usize,
}

impl Default for AlertManagerConfig {
    fn default() -> Self {
        Self {
            cooldown: COOLDOWN_WINDOW,
            max_alerts: MAX_ALERTS,
        }
    }
}

/// Alert lifecycle manager
///
/// Alerts are ordered most-recent-first. None of the operations fail;
/// unknown ids and keys are ignored.
#[derive(Debug)]
pub struct AlertManager {
    /// Live alerts, newest first
    alerts: Vec<Alert>,
    /// Last raise time per condition key
    cooldowns: HashMap<String, Timestamp>,
    /// Sequence for manual alert keys
    manual_seq: u64,
    /// Configuration
    config: AlertManagerConfig,
}

impl AlertManager {
    /// Create a new alert manager
    pub fn new(config: AlertManagerConfig) -> Self {
        Self {
            alerts: Vec::new(),
            cooldowns: HashMap::new(),
            manual_seq: 0,
            config,
        }
    }

    /// Get live alerts, newest first
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Number of live alerts
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    /// Whether there are no live alerts
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// When `condition_key` was last raised
    pub fn last_raised(&self, condition_key: &str) -> Option<Timestamp> {
        self.cooldowns.get(condition_key).copied()
    }

    /// Apply one tick of evaluation results
    ///
    /// Returns the alerts raised by this call, for notification.
    pub fn reconcile(&mut self, results: &[ConditionResult], now: Timestamp) -> Vec<Alert> {
        let mut raised = Vec::new();

        for result in results {
            if result.is_active {
                if !self.cooldown_elapsed(&result.condition_key, now) {
                    continue;
                }

                self.cooldowns.insert(result.condition_key.clone(), now);
                let alert = Alert::raise(&result.condition_key, result.kind, &result.message, now);
                log::debug!("Raising {} ({})", alert.id, alert.message);
                self.insert(alert.clone());
                raised.push(alert);
            } else {
                self.clear_condition(&result.condition_key);
            }
        }

        raised
    }

    /// Remove the alert with this exact id
    pub fn dismiss(&mut self, id: &str) {
        self.alerts.retain(|a| a.id != id);
    }

    /// Remove every alert
    ///
    /// Cooldowns are kept, so a condition cleared here is not re-raised
    /// before its window expires.
    pub fn clear_all(&mut self) {
        self.alerts.clear();
    }

    /// Raise an alert outside the threshold pipeline
    ///
    /// Manual alerts get a unique key, so they are never replaced or
    /// auto-cleared. They still count towards the retained maximum.
    pub fn add_manual(&mut self, kind: AlertKind, message: &str, now: Timestamp) -> Alert {
        self.manual_seq += 1;
        let key = format!("manual-{}-{}", now, self.manual_seq);
        let alert = Alert::raise(&key, kind, message, now);
        self.insert(alert.clone());
        alert
    }

    /// Get alert count by kind
    pub fn count_by_kind(&self) -> HashMap<AlertKind, usize> {
        let mut counts = HashMap::new();
        for alert in &self.alerts {
            *counts.entry(alert.kind).or_insert(0) += 1;
        }
        counts
    }

    fn cooldown_elapsed(&self, condition_key: &str, now: Timestamp) -> bool {
        match self.cooldowns.get(condition_key) {
            None => true,
            Some(last) => {
                now.saturating_sub(*last) >= self.config.cooldown.as_millis() as Timestamp
            }
        }
    }

    fn clear_condition(&mut self, condition_key: &str) {
        let before = self.alerts.len();
        self.alerts.retain(|a| !a.belongs_to(condition_key));
        if self.alerts.len() != before {
            log::debug!("Cleared {}", condition_key);
        }
    }

    fn insert(&mut self, alert: Alert) {
        self.alerts.retain(|a| !a.belongs_to(&alert.condition_key));
        self.alerts.insert(0, alert);
        self.alerts.truncate(self.config.max_alerts);
    }
}

impl Default for AlertManager {
    fn default() -> Self {
        Self::new(AlertManagerConfig::default())
    }
}
