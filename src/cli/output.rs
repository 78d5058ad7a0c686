//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::alerts::{format_clock, Alert, ConditionResult};
use crate::cli::args::OutputFormat;
use crate::domain::{Parameter, ParameterSnapshot};
use crate::error::{AppError, ConfigError, SnapshotError};
use crate::settings::ThresholdConfig;
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Result of a one-shot evaluation
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub snapshot: ParameterSnapshot,
    pub conditions: Vec<ConditionResult>,
    pub alerts: Vec<Alert>,
}

impl TableDisplay for CheckReport {
    fn to_table(&self) -> String {
        let mut lines = vec![format!(
            "Readings: temperature {}, pH {}, salinity {}, TDS {}",
            reading(self.snapshot.temperature),
            reading(self.snapshot.ph),
            reading(self.snapshot.salinity),
            reading(self.snapshot.tds)
        )];

        lines.push(String::new());
        for condition in &self.conditions {
            let marker = if condition.is_active { "✗" } else { "✓" };
            lines.push(format!("{} {:<10} {}", marker, condition.condition_key, condition.kind));
        }

        lines.push(String::new());
        if self.alerts.is_empty() {
            lines.push("No alerts".to_string());
        } else {
            lines.push(format!("Alerts ({})", self.alerts.len()));
            for alert in &self.alerts {
                lines.push(format!(
                    "  [{}] {} {}",
                    format_clock(alert.created_at),
                    alert.kind,
                    alert.message
                ));
            }
        }

        lines.join("\n")
    }

    fn to_compact(&self) -> String {
        if self.alerts.is_empty() {
            return "ok".to_string();
        }
        self.alerts
            .iter()
            .map(|a| a.condition_key.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Settings with their store location
#[derive(Debug, Clone, Serialize)]
pub struct SettingsReport {
    pub path: String,
    pub settings: ThresholdConfig,
    pub inverted: Vec<Parameter>,
}

impl SettingsReport {
    /// Create a report for settings loaded from `path`
    pub fn new(path: impl Into<String>, settings: ThresholdConfig) -> Self {
        let inverted = settings.inverted_ranges();
        Self {
            path: path.into(),
            settings,
            inverted,
        }
    }
}

impl TableDisplay for SettingsReport {
    fn to_table(&self) -> String {
        let s = &self.settings;
        let (sal_min, sal_max) = s.bounds(Parameter::Salinity);
        let mut lines = vec![
            format!("Settings ({})", self.path),
            String::new(),
            format!(
                "Temperature  {} - {} °C (setpoint {} ±{})",
                s.temp_min, s.temp_max, s.temp_setpoint, s.temp_hysteresis
            ),
            format!("pH           {} - {} {}", s.ph_min, s.ph_max, enabled(s.ph_alert_enabled)),
            format!(
                "Salinity     {:.3} - {:.3} {} {}",
                sal_min,
                sal_max,
                Parameter::Salinity.unit(),
                enabled(s.salinity_alert_enabled)
            ),
            format!("TDS          {} - {} ppm {}", s.tds_min, s.tds_max, enabled(s.tds_alert_enabled)),
            String::new(),
            format!(
                "Alerts {}, sound {}, auto mode {}, refresh every {}s",
                on_off(s.alerts_enabled),
                on_off(s.sound_enabled),
                on_off(s.auto_mode_enabled),
                s.refresh_interval
            ),
        ];

        for parameter in &self.inverted {
            lines.push(format!(
                "Warning: {} minimum is above maximum; its alerts will not fire",
                parameter
            ));
        }

        lines.join("\n")
    }

    fn to_compact(&self) -> String {
        let s = &self.settings;
        let (sal_min, sal_max) = s.bounds(Parameter::Salinity);
        format!(
            "temp {}-{} ph {}-{} sal {:.3}-{:.3} tds {}-{} alerts {}",
            s.temp_min,
            s.temp_max,
            s.ph_min,
            s.ph_max,
            sal_min,
            sal_max,
            s.tds_min,
            s.tds_max,
            on_off(s.alerts_enabled)
        )
    }
}

/// Simple status message
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
    pub success: bool,
}

impl TableDisplay for Message {
    fn to_table(&self) -> String {
        if self.success {
            format!("✓ {}", self.message)
        } else {
            format!("✗ {}", self.message)
        }
    }
}

/// Hint printed under an error, if one applies
pub fn error_hint(err: &AppError) -> Option<String> {
    match err {
        AppError::Config(ConfigError::UnknownField(_)) => Some(format!(
            "Valid fields are: {}",
            ThresholdConfig::field_names().join(", ")
        )),
        AppError::Snapshot(SnapshotError::Unavailable(_)) => {
            Some("Check that the acquisition side is writing the snapshot file.".to_string())
        }
        AppError::Snapshot(SnapshotError::Parse(_)) => Some(
            "Snapshots are JSON objects with temperature, ph, salinity and tds.".to_string(),
        ),
        _ => None,
    }
}

fn reading(value: f64) -> String {
    if value.is_finite() {
        format!("{}", value)
    } else {
        "-".to_string()
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "[alerts on]"
    } else {
        "[alerts off]"
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
