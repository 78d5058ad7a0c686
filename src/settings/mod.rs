//! Threshold settings
//!
//! [`ThresholdConfig`] holds the user-tunable alert bounds. It is stored as a
//! camelCase JSON object (the format the dashboard and the controller's SD
//! card share) and is always loaded leniently: missing or malformed fields
//! fall back to defaults and salinity bounds are normalized to SG.

mod store;
mod watcher;

pub use store::{ConfigStore, FileConfigStore, MemoryConfigStore, SETTINGS_KEY};
pub use watcher::{SettingsWatcher, DEFAULT_POLL_INTERVAL};

use crate::domain::{normalize_salinity, Parameter};
use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Alert thresholds and global toggles
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdConfig {
    pub temp_min: f64,
    pub temp_max: f64,
    /// Heater/chiller target, carried for the controller
    pub temp_setpoint: f64,
    pub temp_hysteresis: f64,

    pub ph_min: f64,
    pub ph_max: f64,
    pub ph_alert_enabled: bool,

    /// Lower salinity bound in SG
    pub salinity_min: f64,
    /// Upper salinity bound in SG
    pub salinity_max: f64,
    pub salinity_alert_enabled: bool,

    pub tds_min: f64,
    pub tds_max: f64,
    pub tds_alert_enabled: bool,

    /// Polling cadence in seconds
    pub refresh_interval: u64,
    pub alerts_enabled: bool,
    pub sound_enabled: bool,
    pub auto_mode_enabled: bool,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            temp_min: 24.0,
            temp_max: 27.0,
            temp_setpoint: 25.5,
            temp_hysteresis: 0.5,
            ph_min: 8.0,
            ph_max: 8.4,
            ph_alert_enabled: true,
            salinity_min: 1.022,
            salinity_max: 1.028,
            salinity_alert_enabled: true,
            tds_min: 100.0,
            tds_max: 400.0,
            tds_alert_enabled: true,
            refresh_interval: 3,
            alerts_enabled: true,
            sound_enabled: false,
            auto_mode_enabled: true,
        }
    }
}

impl ThresholdConfig {
    /// Build a config from a stored JSON value
    ///
    /// Never fails. Anything that is not an object yields the defaults.
    /// Numeric strings are accepted, other non-numeric values fall back to
    /// the default for that field. Unknown fields are ignored.
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        let empty = Map::new();
        let fields = value.as_object().unwrap_or(&empty);

        Self {
            temp_min: number(fields, "tempMin", defaults.temp_min),
            temp_max: number(fields, "tempMax", defaults.temp_max),
            temp_setpoint: number(fields, "tempSetpoint", defaults.temp_setpoint),
            temp_hysteresis: number(fields, "tempHysteresis", defaults.temp_hysteresis),
            ph_min: number(fields, "phMin", defaults.ph_min),
            ph_max: number(fields, "phMax", defaults.ph_max),
            ph_alert_enabled: flag(fields, "phAlertEnabled", defaults.ph_alert_enabled),
            salinity_min: normalize_salinity(number(
                fields,
                "salinityMin",
                defaults.salinity_min,
            )),
            salinity_max: normalize_salinity(number(
                fields,
                "salinityMax",
                defaults.salinity_max,
            )),
            salinity_alert_enabled: flag(
                fields,
                "salinityAlertEnabled",
                defaults.salinity_alert_enabled,
            ),
            tds_min: number(fields, "tdsMin", defaults.tds_min),
            tds_max: number(fields, "tdsMax", defaults.tds_max),
            tds_alert_enabled: flag(fields, "tdsAlertEnabled", defaults.tds_alert_enabled),
            refresh_interval: seconds(fields, "refreshInterval", defaults.refresh_interval),
            alerts_enabled: flag(fields, "alertsEnabled", defaults.alerts_enabled),
            sound_enabled: flag(fields, "soundEnabled", defaults.sound_enabled),
            auto_mode_enabled: flag(fields, "autoModeEnabled", defaults.auto_mode_enabled),
        }
    }

    /// Serialize to the stored JSON representation
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
    }

    /// JSON names of every settings field
    pub fn field_names() -> Vec<String> {
        match Self::default().to_value() {
            Value::Object(fields) => fields.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Set one field by its JSON name from user input
    ///
    /// The value is parsed according to the field's current type and the
    /// whole config goes through the same normalization as a load.
    pub fn set_field(&mut self, field: &str, raw: &str) -> Result<(), ConfigError> {
        let mut value = self.to_value();
        let fields = value
            .as_object_mut()
            .ok_or_else(|| ConfigError::ParseError("settings are not an object".to_string()))?;

        let parsed = match fields.get(field) {
            None => return Err(ConfigError::UnknownField(field.to_string())),
            Some(Value::Bool(_)) => match raw.trim().to_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => Value::Bool(true),
                "false" | "off" | "no" | "0" => Value::Bool(false),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: field.to_string(),
                        message: format!("expected true or false, got '{}'", raw),
                    })
                }
            },
            Some(_) => {
                let number = raw
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .and_then(serde_json::Number::from_f64)
                    .ok_or_else(|| ConfigError::InvalidValue {
                        key: field.to_string(),
                        message: format!("expected a number, got '{}'", raw),
                    })?;
                Value::Number(number)
            }
        };

        fields.insert(field.to_string(), parsed);
        *self = Self::from_value(&value);
        Ok(())
    }

    /// Configured `(min, max)` for a parameter
    ///
    /// Salinity bounds are returned in SG even when the fields were set
    /// directly in the ×1000 encoding.
    pub fn bounds(&self, parameter: Parameter) -> (f64, f64) {
        match parameter {
            Parameter::Temperature => (self.temp_min, self.temp_max),
            Parameter::Ph => (self.ph_min, self.ph_max),
            Parameter::Salinity => (
                normalize_salinity(self.salinity_min),
                normalize_salinity(self.salinity_max),
            ),
            Parameter::Tds => (self.tds_min, self.tds_max),
        }
    }

    /// Whether threshold alerts are enabled for a parameter
    ///
    /// Temperature has no flag of its own and is always enabled.
    pub fn is_enabled(&self, parameter: Parameter) -> bool {
        if !parameter.is_optional() {
            return true;
        }
        match parameter {
            Parameter::Temperature => true,
            Parameter::Ph => self.ph_alert_enabled,
            Parameter::Salinity => self.salinity_alert_enabled,
            Parameter::Tds => self.tds_alert_enabled,
        }
    }

    /// Parameters whose minimum is above their maximum
    pub fn inverted_ranges(&self) -> Vec<Parameter> {
        Parameter::ALL
            .into_iter()
            .filter(|p| {
                let (min, max) = self.bounds(*p);
                min > max
            })
            .collect()
    }
}

impl<'de> Deserialize<'de> for ThresholdConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

fn number(fields: &Map<String, Value>, key: &str, default: f64) -> f64 {
    let parsed = match fields.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() => n,
        _ => {
            if fields.contains_key(key) {
                log::warn!("Settings field '{}' is not numeric, using {}", key, default);
            }
            default
        }
    }
}

fn flag(fields: &Map<String, Value>, key: &str, default: bool) -> bool {
    match fields.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) if s == "true" => true,
        Some(Value::String(s)) if s == "false" => false,
        _ => default,
    }
}

fn seconds(fields: &Map<String, Value>, key: &str, default: u64) -> u64 {
    let value = number(fields, key, default as f64);
    if value >= 1.0 {
        value as u64
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = ThresholdConfig::default();
        assert_eq!(config.temp_min, 24.0);
        assert_eq!(config.temp_max, 27.0);
        assert_eq!(config.salinity_min, 1.022);
        assert_eq!(config.tds_max, 400.0);
        assert_eq!(config.refresh_interval, 3);
        assert!(config.alerts_enabled);
        assert!(!config.sound_enabled);
    }

    #[test]
    fn test_empty_object_yields_defaults() {
        let config = ThresholdConfig::from_value(&json!({}));
        assert_eq!(config, ThresholdConfig::default());
    }

    #[test]
    fn test_non_object_yields_defaults() {
        assert_eq!(
            ThresholdConfig::from_value(&json!("garbage")),
            ThresholdConfig::default()
        );
        assert_eq!(
            ThresholdConfig::from_value(&Value::Null),
            ThresholdConfig::default()
        );
    }

    #[test]
    fn test_partial_object_fills_missing() {
        let config = ThresholdConfig::from_value(&json!({
            "tempMin": 23.0,
            "soundEnabled": true
        }));
        assert_eq!(config.temp_min, 23.0);
        assert!(config.sound_enabled);
        assert_eq!(config.temp_max, 27.0);
        assert_eq!(config.ph_min, 8.0);
    }

    #[test]
    fn test_non_numeric_bound_uses_default() {
        let config = ThresholdConfig::from_value(&json!({
            "phMin": null,
            "phMax": "abc",
            "tdsMin": "150"
        }));
        assert_eq!(config.ph_min, 8.0);
        assert_eq!(config.ph_max, 8.4);
        assert_eq!(config.tds_min, 150.0);
    }

    #[test]
    fn test_legacy_salinity_bounds_normalized() {
        let config = ThresholdConfig::from_value(&json!({
            "salinityMin": 1022,
            "salinityMax": 1028
        }));
        assert!((config.salinity_min - 1.022).abs() < 1e-12);
        assert!((config.salinity_max - 1.028).abs() < 1e-12);
    }

    #[test]
    fn test_legacy_fields_ignored() {
        let config = ThresholdConfig::from_value(&json!({
            "orpMin": 300,
            "orpMax": 450,
            "orpAlertEnabled": true
        }));
        assert_eq!(config, ThresholdConfig::default());
    }

    #[test]
    fn test_serialize_camel_case() {
        let value = ThresholdConfig::default().to_value();
        assert_eq!(value["tempMin"], json!(24.0));
        assert_eq!(value["salinityAlertEnabled"], json!(true));
        assert_eq!(value["refreshInterval"], json!(3));
    }

    #[test]
    fn test_deserialize_through_serde() {
        let config: ThresholdConfig =
            serde_json::from_str(r#"{"tempMax": 28.5, "salinityMax": 1030}"#).unwrap();
        assert_eq!(config.temp_max, 28.5);
        assert!((config.salinity_max - 1.03).abs() < 1e-12);
    }

    #[test]
    fn test_refresh_interval_invalid() {
        let config = ThresholdConfig::from_value(&json!({ "refreshInterval": 0 }));
        assert_eq!(config.refresh_interval, 3);

        let config = ThresholdConfig::from_value(&json!({ "refreshInterval": 10 }));
        assert_eq!(config.refresh_interval, 10);
    }

    #[test]
    fn test_set_field_number() {
        let mut config = ThresholdConfig::default();
        config.set_field("phMin", "7.9").unwrap();
        assert_eq!(config.ph_min, 7.9);
    }

    #[test]
    fn test_set_field_salinity_normalized() {
        let mut config = ThresholdConfig::default();
        config.set_field("salinityMin", "1021").unwrap();
        assert!((config.salinity_min - 1.021).abs() < 1e-12);
    }

    #[test]
    fn test_set_field_bool() {
        let mut config = ThresholdConfig::default();
        config.set_field("soundEnabled", "on").unwrap();
        assert!(config.sound_enabled);
        config.set_field("phAlertEnabled", "false").unwrap();
        assert!(!config.ph_alert_enabled);
    }

    #[test]
    fn test_set_field_errors() {
        let mut config = ThresholdConfig::default();
        assert!(matches!(
            config.set_field("orpMin", "300"),
            Err(ConfigError::UnknownField(_))
        ));
        assert!(matches!(
            config.set_field("tempMin", "cold"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set_field("alertsEnabled", "maybe"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(config, ThresholdConfig::default());
    }

    #[test]
    fn test_field_names() {
        let names = ThresholdConfig::field_names();
        assert_eq!(names.len(), 17);
        assert!(names.contains(&"tdsAlertEnabled".to_string()));
    }

    #[test]
    fn test_inverted_ranges() {
        let mut config = ThresholdConfig::default();
        assert!(config.inverted_ranges().is_empty());

        config.ph_min = 8.5;
        config.ph_max = 8.0;
        assert_eq!(config.inverted_ranges(), vec![Parameter::Ph]);
    }

    #[test]
    fn test_inverted_ranges_mixed_salinity_encoding() {
        let mut config = ThresholdConfig::default();
        config.salinity_min = 1022.0;
        assert!(config.inverted_ranges().is_empty());
        assert!((config.bounds(Parameter::Salinity).0 - 1.022).abs() < 1e-12);

        config.salinity_min = 1030.0;
        assert_eq!(config.inverted_ranges(), vec![Parameter::Salinity]);
    }

    #[test]
    fn test_bounds_and_enabled() {
        let mut config = ThresholdConfig::default();
        config.tds_alert_enabled = false;
        assert_eq!(config.bounds(Parameter::Tds), (100.0, 400.0));
        assert!(!config.is_enabled(Parameter::Tds));
        assert!(config.is_enabled(Parameter::Temperature));
    }
}
