//! `certguard config` - inspect the resolved configuration.

use serde_json::{Value, json};

use crate::{
    cli::ConfigCommands,
    config::{self, AppConfig},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config_file: Option<&std::path::PathBuf>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if output.is_json() {
                output.json(&json!({ "key": key, "value": value }))?;
            } else {
                output.emit(&format!("{key} = {}", render(&value)))?;
            }
        }

        ConfigCommands::List => {
            if output.is_json() {
                return output.json(&config);
            }
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            let path = AppConfig::active_path(config_file);
            let note = if config::exists(&path) { "" } else { " (not found)" };
            output.emit(&format!("{}{note}", path.display()))?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<Value> {
    config.get(key).ok_or_else(|| CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    })
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
