//! Monitored water parameters
//!
//! Provides the parameter enumeration and the per-tick reading snapshot
//! delivered by the data-acquisition side (device polling, manual entry).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A monitored aquarium quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    /// Water temperature (°C)
    Temperature,
    /// pH
    Ph,
    /// Salinity as specific gravity
    Salinity,
    /// Total dissolved solids (ppm)
    Tds,
}

impl Parameter {
    /// All parameters in evaluation order
    pub const ALL: [Parameter; 4] = [
        Parameter::Temperature,
        Parameter::Ph,
        Parameter::Salinity,
        Parameter::Tds,
    ];

    /// Prefix used to build condition keys (`temp-low`, `sal-high`, ...)
    pub const fn key_prefix(&self) -> &'static str {
        match self {
            Self::Temperature => "temp",
            Self::Ph => "ph",
            Self::Salinity => "sal",
            Self::Tds => "tds",
        }
    }

    /// Display unit
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Ph => "",
            Self::Salinity => "SG",
            Self::Tds => "ppm",
        }
    }

    /// Temperature is always evaluated; the others have an enable flag
    pub const fn is_optional(&self) -> bool {
        !matches!(self, Self::Temperature)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "temperature"),
            Self::Ph => write!(f, "ph"),
            Self::Salinity => write!(f, "salinity"),
            Self::Tds => write!(f, "tds"),
        }
    }
}

/// Current reading of every monitored parameter
///
/// Missing or `null` readings deserialize to NaN, which the evaluator
/// treats as "no data" (never alerting).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSnapshot {
    #[serde(default = "missing", deserialize_with = "reading")]
    pub temperature: f64,
    #[serde(default = "missing", deserialize_with = "reading")]
    pub ph: f64,
    /// SG, or a raw instrument reading (SG × 1000)
    #[serde(default = "missing", deserialize_with = "reading")]
    pub salinity: f64,
    #[serde(default = "missing", deserialize_with = "reading")]
    pub tds: f64,
}

impl ParameterSnapshot {
    /// Create a snapshot with every reading present
    pub const fn new(temperature: f64, ph: f64, salinity: f64, tds: f64) -> Self {
        Self {
            temperature,
            ph,
            salinity,
            tds,
        }
    }

    /// Snapshot without any readings
    pub const fn empty() -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN)
    }

    /// Builder: set temperature
    pub fn with_temperature(mut self, value: f64) -> Self {
        self.temperature = value;
        self
    }

    /// Builder: set pH
    pub fn with_ph(mut self, value: f64) -> Self {
        self.ph = value;
        self
    }

    /// Builder: set salinity
    pub fn with_salinity(mut self, value: f64) -> Self {
        self.salinity = value;
        self
    }

    /// Builder: set TDS
    pub fn with_tds(mut self, value: f64) -> Self {
        self.tds = value;
        self
    }

    /// Reading for a parameter
    pub fn value(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Temperature => self.temperature,
            Parameter::Ph => self.ph,
            Parameter::Salinity => self.salinity,
            Parameter::Tds => self.tds,
        }
    }
}

impl Default for ParameterSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

fn missing() -> f64 {
    f64::NAN
}

fn reading<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
