//! Init and Config commands.

use crate::config::Settings;
use crate::error::CalibResult;

/// Run init command - create configuration file.
pub fn run_init(force: bool) -> CalibResult<()> {
    let path = Settings::init_config_file(force)?;
    println!("Created configuration file at: {}", path.display());
    println!("Edit the [points] pairs with your ADC and temperature readings.");
    Ok(())
}

/// Run config command - display current configuration.
pub fn run_config(settings: &Settings) -> CalibResult<()> {
    println!("Current Configuration:");
    println!("{}", "=".repeat(50));
    println!("{}", toml::to_string_pretty(settings)?);
    Ok(())
}
