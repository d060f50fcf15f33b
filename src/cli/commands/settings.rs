//! Configuration inspection commands.

use std::path::Path;

use crate::config::{self, Config};

/// Print the effective configuration with the API key redacted
pub fn cmd_config_show(config: &Config, db_path: &Path) -> anyhow::Result<()> {
    let mut shown = config.clone();
    if shown.credentials.openai_api_key.is_some() {
        shown.credentials.openai_api_key = Some("<redacted>".to_string());
    }
    shown.library.db_path = Some(db_path.to_path_buf());

    print!("{}", toml::to_string_pretty(&shown)?);
    Ok(())
}

/// Print where the config file lives
pub fn cmd_config_path() -> anyhow::Result<()> {
    match config::config_path() {
        Some(path) => {
            let status = if path.exists() { "" } else { " (not created yet)" };
            println!("{}{}", path.display(), status);
            Ok(())
        }
        None => Err(config::ConfigError::NoConfigDir.into()),
    }
}

/// Write a default config file if none exists yet
pub fn cmd_config_init() -> anyhow::Result<()> {
    let path = config::config_path().ok_or(config::ConfigError::NoConfigDir)?;
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }
    config::save(&Config::default())?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}
