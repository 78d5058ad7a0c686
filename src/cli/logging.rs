//! Logger setup for the CLI
//!
//! `RUST_LOG` wins when set; otherwise `-v` (or `general.verbose`) selects
//! debug output and the default is warnings only.

use env_logger::{Builder, Env};

/// Default filter for the verbosity setting
pub fn log_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Logger builder for the verbosity setting
pub fn logger(verbose: bool) -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or(log_filter(verbose)));
    builder.format_timestamp(None);
    builder
}

/// Install the global logger
pub fn init_logging(verbose: bool) {
    logger(verbose).init();
}
