//! Config command - show configuration.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;

/// Run a config action.
pub fn run_config(action: &ConfigAction, settings: &Settings) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            Output::header("Configuration");
            let rendered = toml::to_string_pretty(settings)?;
            println!("{}", rendered);
        }
        ConfigAction::Path => {
            println!("{}", Settings::default_config_path().display());
        }
    }
    Ok(())
}
