//! Threshold evaluation
//!
//! Pure mapping from a reading snapshot and the threshold settings to the
//! state of every alert condition. No state is carried between ticks.

use super::types::{AlertKind, ConditionResult};
use crate::domain::{normalize_salinity, Parameter, ParameterSnapshot};
use crate::settings::ThresholdConfig;

/// Evaluates threshold rules
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertEvaluator;

impl AlertEvaluator {
    /// Evaluate every condition
    ///
    /// Always returns one result per condition key, active or not, so that
    /// inactive results can drive auto-clear. A condition is active only
    /// when alerts are enabled globally and for its parameter, the reading
    /// and both bounds are finite, the range is not inverted, and the
    /// reading lies outside it.
    pub fn evaluate(snapshot: &ParameterSnapshot, config: &ThresholdConfig) -> Vec<ConditionResult> {
        Parameter::ALL
            .into_iter()
            .flat_map(|parameter| Self::evaluate_parameter(parameter, snapshot, config))
            .collect()
    }

    /// Evaluate the `-low` / `-high` pair of one parameter
    pub fn evaluate_parameter(
        parameter: Parameter,
        snapshot: &ParameterSnapshot,
        config: &ThresholdConfig,
    ) -> [ConditionResult; 2] {
        let (min, max) = config.bounds(parameter);
        let value = match parameter {
            Parameter::Salinity => normalize_salinity(snapshot.value(parameter)),
            _ => snapshot.value(parameter),
        };

        let comparable = value.is_finite() && min.is_finite() && max.is_finite();
        if comparable && min > max {
            log::debug!(
                "Inverted {} range [{}, {}], skipping evaluation",
                parameter,
                min,
                max
            );
        }

        let armed =
            config.alerts_enabled && config.is_enabled(parameter) && comparable && min <= max;
        let kind = kind_for(parameter);
        let prefix = parameter.key_prefix();
        let (low_message, high_message) = messages(parameter, value, min, max);

        [
            ConditionResult::new(
                format!("{}-low", prefix),
                kind,
                low_message,
                armed && value < min,
            ),
            ConditionResult::new(
                format!("{}-high", prefix),
                kind,
                high_message,
                armed && value > max,
            ),
        ]
    }
}

fn kind_for(parameter: Parameter) -> AlertKind {
    match parameter {
        Parameter::Temperature => AlertKind::Error,
        Parameter::Ph | Parameter::Salinity => AlertKind::Warning,
        Parameter::Tds => AlertKind::Info,
    }
}

fn messages(parameter: Parameter, value: f64, min: f64, max: f64) -> (String, String) {
    let (low, high) = match parameter {
        Parameter::Temperature => ("Temperatura baixa", "Temperatura alta"),
        Parameter::Ph => ("pH baixo", "pH alto"),
        Parameter::Salinity => ("Salinidade baixa", "Salinidade alta"),
        Parameter::Tds => ("TDS baixo", "TDS alto"),
    };

    let value = with_unit(parameter, reading(parameter, value));
    (
        format!("{}: {} (mín: {})", low, value, with_unit(parameter, bound(parameter, min))),
        format!("{}: {} (máx: {})", high, value, with_unit(parameter, bound(parameter, max))),
    )
}

fn reading(parameter: Parameter, value: f64) -> String {
    match parameter {
        Parameter::Temperature => format!("{:.1}", value),
        Parameter::Ph => format!("{:.2}", value),
        Parameter::Salinity => format!("{:.3}", value),
        Parameter::Tds => format!("{:.0}", value),
    }
}

/// Bounds print in shortest form, except salinity and TDS
fn bound(parameter: Parameter, value: f64) -> String {
    match parameter {
        Parameter::Salinity => format!("{:.3}", value),
        Parameter::Tds => format!("{:.0}", value),
        Parameter::Temperature | Parameter::Ph => format!("{}", value),
    }
}

fn with_unit(parameter: Parameter, text: String) -> String {
    match parameter.unit() {
        "" => text,
        unit if unit.starts_with('°') => format!("{}{}", text, unit),
        unit => format!("{} {}", text, unit),
    }
}
