//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Aquarium controller alert monitor
///
/// Evaluate water-parameter readings against alert thresholds, watch a
/// reading feed, and edit the threshold settings.
#[derive(Parser, Debug)]
#[command(name = "reefwatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "REEFWATCH_CONFIG")]
    pub config: Option<String>,

    /// Path to the settings store
    #[arg(long, global = true, env = "REEFWATCH_SETTINGS")]
    pub settings: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate one set of readings against the thresholds
    Check(CheckArgs),

    /// Monitor a reading feed and raise alerts
    Watch(WatchArgs),

    /// Show or edit threshold settings
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Water temperature in °C
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: Option<f64>,

    /// pH
    #[arg(long)]
    pub ph: Option<f64>,

    /// Salinity as SG (1.025) or refractometer reading (1025)
    #[arg(long)]
    pub salinity: Option<f64>,

    /// Total dissolved solids in ppm
    #[arg(long)]
    pub tds: Option<f64>,

    /// Read the readings from a snapshot file instead
    #[arg(long, conflicts_with_all = ["temperature", "ph", "salinity", "tds"])]
    pub snapshot: Option<String>,
}

/// Arguments for the watch command
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Snapshot file to poll
    #[arg(long)]
    pub snapshot: Option<String>,

    /// Tick interval in seconds (defaults to the settings' refresh interval)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Run once and exit
    #[arg(long)]
    pub once: bool,

    /// Exit instead of retrying when the snapshot cannot be read
    #[arg(long)]
    pub no_retry: bool,
}

/// Arguments for settings commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current settings
    Show,

    /// Print the settings store path
    Path,

    /// Restore factory defaults
    Reset,

    /// Set one field, e.g. `set phMin 7.9`
    Set {
        /// Field name as stored (camelCase)
        field: String,

        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check_values() {
        let args = Cli::try_parse_from([
            "reefwatch",
            "check",
            "--temperature",
            "23.5",
            "--salinity",
            "1025",
        ])
        .unwrap();

        if let Commands::Check(check) = args.command {
            assert_eq!(check.temperature, Some(23.5));
            assert_eq!(check.salinity, Some(1025.0));
            assert!(check.ph.is_none());
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_check_snapshot_conflicts() {
        let result = Cli::try_parse_from([
            "reefwatch",
            "check",
            "--snapshot",
            "snap.json",
            "--ph",
            "8.1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_verbose_and_format() {
        let args = Cli::try_parse_from(["reefwatch", "-v", "--format", "json", "config", "show"])
            .unwrap();
        assert!(args.verbose);
        assert!(matches!(args.format, OutputFormat::Json));
    }

    #[test]
    fn test_cli_parse_watch() {
        let args = Cli::try_parse_from([
            "reefwatch",
            "watch",
            "--snapshot",
            "/tmp/snap.json",
            "--interval",
            "5",
            "--once",
        ])
        .unwrap();

        if let Commands::Watch(watch) = args.command {
            assert_eq!(watch.snapshot.as_deref(), Some("/tmp/snap.json"));
            assert_eq!(watch.interval, Some(5));
            assert!(watch.once);
            assert!(!watch.no_retry);
        } else {
            panic!("Expected Watch command");
        }
    }

    #[test]
    fn test_cli_watch_interval_validation() {
        let result = Cli::try_parse_from(["reefwatch", "watch", "--interval", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_config_set() {
        let args = Cli::try_parse_from(["reefwatch", "config", "set", "tempMin", "-1"]).unwrap();
        if let Commands::Config(config) = args.command {
            if let ConfigCommands::Set { field, value } = config.command {
                assert_eq!(field, "tempMin");
                assert_eq!(value, "-1");
            } else {
                panic!("Expected Set command");
            }
        } else {
            panic!("Expected Config command");
        }
    }

    #[test]
    fn test_cli_settings_path() {
        let args =
            Cli::try_parse_from(["reefwatch", "--settings", "/tmp/s.json", "config", "path"])
                .unwrap();
        assert_eq!(args.settings.as_deref(), Some("/tmp/s.json"));
    }
}
