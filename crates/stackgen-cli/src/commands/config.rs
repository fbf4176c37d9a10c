//! `stackgen config` — read configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {value}"))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let unset = || "(unset)".to_string();
    match key {
        "defaults.database" => Ok(config.defaults.database.clone().unwrap_or_else(unset)),
        "defaults.docker" => Ok(config
            .defaults
            .docker
            .map(|v| v.to_string())
            .unwrap_or_else(unset)),
        "defaults.port" => Ok(config
            .defaults
            .port
            .map(|v| v.to_string())
            .unwrap_or_else(unset)),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        "templates.api_mongodb" => Ok(config.templates.api_mongodb.clone().unwrap_or_else(unset)),
        "templates.api_postgres" => Ok(config.templates.api_postgres.clone().unwrap_or_else(unset)),
        "templates.frontend" => Ok(config.templates.frontend.clone().unwrap_or_else(unset)),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_resolve() {
        let mut config = AppConfig::default();
        config.defaults.database = Some("postgres".into());
        assert_eq!(
            get_config_value(&config, "defaults.database").unwrap(),
            "postgres"
        );
        assert_eq!(
            get_config_value(&config, "output.format").unwrap(),
            "human"
        );
        assert_eq!(
            get_config_value(&config, "defaults.port").unwrap(),
            "(unset)"
        );
    }

    #[test]
    fn unknown_key_is_a_config_error() {
        let err = get_config_value(&AppConfig::default(), "nope.nope").unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
