//! User configuration.
//!
//! [`Settings`] is loaded once at startup and passed down by value. Its
//! `[defaults]` table is the core [`Defaults`] table, so anything a question
//! falls back to can be changed per user.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `ROOST_` prefix, `__` between levels
//!    (`ROOST_OUTPUT__NO_COLOR=true`, `ROOST_TEMPLATES__DIR=./tpl`)
//! 3. Config file: `--config FILE`, else the per-user file from
//!    [`Settings::config_path`]
//! 4. Built-in defaults (always present)
//!
//! ```toml
//! [defaults]
//! version = "1.0.0"
//! defaultCssCompiler = "sass"
//!
//! [defaults.https]
//! enable = true
//!
//! [output]
//! no_color = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use roost_core::domain::Defaults;

use crate::cli::OutputFormat;

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "ROOST";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fallback answers for every question.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Used when `--output-format` is left at `auto`.
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory whose files replace embedded templates with the same id.
    pub dir: Option<PathBuf>,
}

impl Settings {
    /// Load configuration layered over the built-in defaults.
    ///
    /// An explicit `config_file` must exist; the per-user file is optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "loading configuration");

        Config::builder()
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.roost.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "roost", "roost")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".roost.toml"))
    }

    /// Serialize as the TOML `roost init` writes.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roost_core::domain::CssCompiler;
    use std::fs;

    #[test]
    fn defaults_match_core_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.defaults, Defaults::default());
        assert!(!settings.output.no_color);
        assert_eq!(settings.output.format, OutputFormat::Auto);
    }

    #[test]
    fn file_overrides_only_named_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[defaults]\nversion = \"2.0.0\"\n\n[defaults.https]\nenable = true\n\n[output]\nno_color = true\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.defaults.version, "2.0.0");
        assert!(settings.defaults.https.enable);
        assert_eq!(settings.defaults.https.port, 43733);
        assert_eq!(settings.defaults.models_path, "mvc/models");
        assert!(settings.output.no_color);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn invalid_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[defaults.https]\nport = \"not a port\"\n").unwrap();
        assert!(Settings::load(Some(&path)).is_err());
    }

    #[test]
    fn init_toml_round_trips() {
        let mut settings = Settings::default();
        settings.defaults.default_css_compiler = CssCompiler::Sass;
        let text = settings.to_toml().unwrap();
        assert!(text.contains("[defaults]"));

        let loaded: Settings = toml::from_str(&text).unwrap();
        assert_eq!(loaded.defaults.default_css_compiler, CssCompiler::Sass);
        assert_eq!(loaded.defaults.bundles, Defaults::default().bundles);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!Settings::config_path().as_os_str().is_empty());
    }
}
