//! `roost init`: write a default configuration file.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::Settings,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Write the default settings to `--config` or the per-user config path.
pub fn execute(args: InitArgs, global: &GlobalArgs, output: OutputManager) -> CliResult<()> {
    let path = global.config.clone().unwrap_or_else(Settings::config_path);

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            path.display(),
        ))?;
        return Ok(());
    }

    write_defaults(&path)?;
    info!(path = %path.display(), "config written");
    output.success(&format!("Configuration created at {}", path.display()))?;
    Ok(())
}

fn write_defaults(path: &Path) -> CliResult<()> {
    let text = Settings::default()
        .to_toml()
        .map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise default config: {e}"),
            source: Some(Box::new(e)),
        })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_cli_context(|| format!("creating config directory '{}'", parent.display()))?;
    }
    fs::write(path, text).with_cli_context(|| format!("writing config to '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("roost.toml");
        write_defaults(&path).unwrap();

        let loaded = Settings::load(Some(&path)).unwrap();
        assert_eq!(loaded.defaults.http_port, Settings::default().defaults.http_port);
    }
}
