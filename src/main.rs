//! reefwatch - aquarium alert monitor
//!
//! A command-line tool for checking water-parameter readings against alert
//! thresholds, watching a reading feed, and editing the thresholds.

use clap::Parser;
use reefwatch::cli::args::{generate_completions, Cli, Commands};
use reefwatch::cli::init_logging;
use reefwatch::cli::output::error_hint;
use reefwatch::commands::{run_check, run_config, run_watch};
use reefwatch::config::{Config, ConfigBuilder};
use reefwatch::error::AppError;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    let config = ConfigBuilder::new()
        .with_file(cli.config.as_deref())
        .with_verbose(cli.verbose.then_some(true))
        .with_settings_path(cli.settings.clone())
        .build();

    // Initialize logging; verbose raises the default filter to debug
    init_logging(config.general.verbose);

    // Run the appropriate command
    let result = run(&cli, config);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: Config) -> Result<(), AppError> {
    match &cli.command {
        Commands::Check(args) => run_check(args, &config, cli.format),

        Commands::Watch(args) => run_watch(args, config, cli.format),

        Commands::Config(args) => run_config(args, &config, cli.format),

        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    if let Some(hint) = error_hint(err) {
        eprintln!();
        eprintln!("Hint: {}", hint);
    }
}
