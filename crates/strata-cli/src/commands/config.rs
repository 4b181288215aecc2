//! `strata config`: inspect the effective configuration.

use crate::{cli::ConfigCommands, config::AppConfig, error::CliResult, output::OutputManager};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            // Always printed: scripts read this value.
            println!("{}", config.get(&key)?);
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            output.print(&config.to_toml()?)?;
        }

        ConfigCommands::Path => {
            println!("{}", AppConfig::config_path().display());
        }
    }

    Ok(())
}
