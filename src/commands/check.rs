//! Check command implementation
//!
//! Evaluates one set of readings against the stored thresholds.

use crate::alerts::{Alert, ConditionResult, NotificationManager};
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::cli::output::{print_output, CheckReport};
use crate::commands::open_store;
use crate::config::Config;
use crate::domain::ParameterSnapshot;
use crate::error::{ConfigError, Result};
use crate::services::AlertService;
use crate::settings::{ConfigStore, ThresholdConfig};
use crate::source::{FileSnapshotSource, SnapshotSource, StaticSnapshotSource};

/// Execute the check command
pub fn run_check(args: &CheckArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let store = open_store(config);
    let settings = store.load();
    log::debug!("Loaded settings from {}", store.path().display());

    let snapshot = resolve_snapshot(args, config)?;
    let report = evaluate_once(&snapshot, settings);

    print_output(&report, format)?;
    Ok(())
}

/// Readings from the flags, the snapshot flag, or the configured snapshot file
fn resolve_snapshot(args: &CheckArgs, config: &Config) -> Result<ParameterSnapshot> {
    let source = resolve_source(args, config)?;
    log::debug!("Reading {}", source.describe());
    Ok(source.read()?)
}

fn resolve_source(args: &CheckArgs, config: &Config) -> Result<Box<dyn SnapshotSource>> {
    if let Some(path) = &args.snapshot {
        return Ok(Box::new(FileSnapshotSource::new(path)));
    }

    if let Some(snapshot) = snapshot_from_args(args) {
        return Ok(Box::new(StaticSnapshotSource::new(snapshot)));
    }

    match &config.general.snapshot_path {
        Some(path) => Ok(Box::new(FileSnapshotSource::new(path))),
        None => Err(ConfigError::InvalidValue {
            key: "snapshot".to_string(),
            message: "no readings given; pass --temperature/--ph/--salinity/--tds or --snapshot"
                .to_string(),
        }
        .into()),
    }
}

/// Build a snapshot from individual reading flags
///
/// Returns `None` when no reading was given.
fn snapshot_from_args(args: &CheckArgs) -> Option<ParameterSnapshot> {
    if args.temperature.is_none() && args.ph.is_none() && args.salinity.is_none() && args.tds.is_none()
    {
        return None;
    }

    let mut snapshot = ParameterSnapshot::empty();
    if let Some(t) = args.temperature {
        snapshot = snapshot.with_temperature(t);
    }
    if let Some(ph) = args.ph {
        snapshot = snapshot.with_ph(ph);
    }
    if let Some(s) = args.salinity {
        snapshot = snapshot.with_salinity(s);
    }
    if let Some(tds) = args.tds {
        snapshot = snapshot.with_tds(tds);
    }
    Some(snapshot)
}

/// Run one quiet tick and collect the report
fn evaluate_once(snapshot: &ParameterSnapshot, settings: ThresholdConfig) -> CheckReport {
    let mut service = AlertService::new(settings, NotificationManager::new());
    let conditions: Vec<ConditionResult> = service.evaluate(snapshot);
    let alerts: Vec<Alert> = service.tick(snapshot);

    CheckReport {
        snapshot: *snapshot,
        conditions,
        alerts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args() -> CheckArgs {
        CheckArgs {
            temperature: None,
            ph: None,
            salinity: None,
            tds: None,
            snapshot: None,
        }
    }

    #[test]
    fn test_snapshot_from_args_none() {
        assert!(snapshot_from_args(&args()).is_none());
    }

    #[test]
    fn test_snapshot_from_args_partial() {
        let snapshot = snapshot_from_args(&CheckArgs {
            ph: Some(8.1),
            ..args()
        })
        .unwrap();
        assert_eq!(snapshot.ph, 8.1);
        assert!(snapshot.temperature.is_nan());
        assert!(snapshot.tds.is_nan());
    }

    #[test]
    fn test_resolve_snapshot_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"temperature": 23.0, "ph": 8.2}}"#).unwrap();

        let snapshot = resolve_snapshot(
            &CheckArgs {
                snapshot: Some(file.path().display().to_string()),
                ..args()
            },
            &Config::default(),
        )
        .unwrap();
        assert_eq!(snapshot.temperature, 23.0);
        assert!(snapshot.salinity.is_nan());
    }

    #[test]
    fn test_flag_readings_use_static_source() {
        let args = CheckArgs {
            temperature: Some(26.0),
            tds: Some(150.0),
            ..args()
        };
        let source = resolve_source(&args, &Config::default()).unwrap();
        assert_eq!(source.describe(), "static readings");

        let snapshot = resolve_snapshot(&args, &Config::default()).unwrap();
        assert_eq!(snapshot.temperature, 26.0);
        assert_eq!(snapshot.tds, 150.0);
        assert!(snapshot.ph.is_nan());
    }

    #[test]
    fn test_resolve_snapshot_requires_readings() {
        assert!(resolve_snapshot(&args(), &Config::default()).is_err());
    }

    #[test]
    fn test_evaluate_once_reports_alerts() {
        let snapshot = ParameterSnapshot::new(23.0, 8.2, 1025.0, 200.0);
        let report = evaluate_once(&snapshot, ThresholdConfig::default());

        assert_eq!(report.conditions.len(), 8);
        assert_eq!(report.alerts.len(), 1);
        assert_eq!(report.alerts[0].condition_key, "temp-low");
    }

    #[test]
    fn test_evaluate_once_disabled_alerts() {
        let settings = ThresholdConfig {
            alerts_enabled: false,
            ..ThresholdConfig::default()
        };
        let snapshot = ParameterSnapshot::new(30.0, 9.0, 1.040, 900.0);
        let report = evaluate_once(&snapshot, settings);

        assert!(report.alerts.is_empty());
        assert!(report.conditions.iter().all(|c| !c.is_active));
    }
}
