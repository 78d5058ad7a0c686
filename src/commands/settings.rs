//! Config command implementation
//!
//! Shows and edits the threshold settings in the settings store.

use crate::cli::args::{ConfigArgs, ConfigCommands, OutputFormat};
use crate::cli::output::{print_output, Message, SettingsReport};
use crate::commands::open_store;
use crate::config::Config;
use crate::error::Result;
use crate::settings::{ConfigStore, FileConfigStore, ThresholdConfig};

/// Execute the config command
pub fn run_config(args: &ConfigArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let store = open_store(config);
    let path = store.path().display().to_string();

    match &args.command {
        ConfigCommands::Show => {
            print_output(&SettingsReport::new(path, store.load()), format)?;
        }
        ConfigCommands::Path => {
            println!("{}", path);
        }
        ConfigCommands::Reset => {
            store.save(&ThresholdConfig::default())?;
            log::info!("Settings at {} reset to defaults", path);
            let msg = Message {
                message: format!("Settings reset to defaults ({})", path),
                success: true,
            };
            print_output(&msg, format)?;
        }
        ConfigCommands::Set { field, value } => {
            let updated = set_field(&store, field, value)?;
            print_output(&SettingsReport::new(path, updated), format)?;
        }
    }

    Ok(())
}

/// Update one field and persist the result
fn set_field(store: &FileConfigStore, field: &str, value: &str) -> Result<ThresholdConfig> {
    let mut settings = store.load();
    settings.set_field(field, value)?;
    store.save(&settings)?;
    log::info!("Set {} = {}", field, value);
    Ok(settings)
}
