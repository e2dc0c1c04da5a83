//! `roost config`: inspect the effective configuration.

use serde_json::Value;

use crate::{
    cli::{ConfigCommands, OutputFormat},
    config::Settings,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, settings: Settings, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = lookup(&settings, &key)?;
            if output.format() == OutputFormat::Json {
                output.json(&value)?;
            } else {
                output.print(&render(&value))?;
            }
        }

        ConfigCommands::List => {
            if output.format() == OutputFormat::Json {
                output.json(&settings)?;
            } else {
                output.header("Current configuration:")?;
                let text = settings.to_toml().map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
                output.print(&text)?;
            }
        }

        ConfigCommands::Path => {
            output.print(&Settings::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Walk the serialised settings by a dotted key.
fn lookup(settings: &Settings, key: &str) -> CliResult<Value> {
    let unknown = || CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    };
    let root = serde_json::to_value(settings).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    let mut current = &root;
    for segment in key.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment).ok_or_else(unknown)?,
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get(i))
                .ok_or_else(unknown)?,
            _ => return Err(unknown()),
        };
    }
    Ok(current.clone())
}

/// Strings print bare; everything else as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_nested_key() {
        let settings = Settings::default();
        let port = lookup(&settings, "defaults.httpPort").unwrap();
        assert_eq!(port, Value::from(43711));
        assert_eq!(render(&port), "43711");
    }

    #[test]
    fn strings_render_bare() {
        let settings = Settings::default();
        let format = lookup(&settings, "output.format").unwrap();
        assert_eq!(render(&format), "auto");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let settings = Settings::default();
        assert!(matches!(
            lookup(&settings, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
        assert!(matches!(
            lookup(&settings, "defaults.httpPort.deeper"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn unknown_key_exits_with_configuration_code() {
        let err = lookup(&Settings::default(), "nope").unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
