//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site, not here)
//! 2. Environment variables: `STRATA_DEFAULTS__CACHE=true`,
//!    `STRATA_TEMPLATES__LOCAL_PATH=./payloads`, ...
//! 3. `.strata.toml` in the current directory
//! 4. The user config file, or the file given with `--config`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = ".strata.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Values used for `strata new` when no flag is given.
    pub defaults: Defaults,
    pub output: OutputConfig,
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub language: String,
    pub cache: bool,
    pub docker: bool,
    pub example_module: bool,
    /// Where projects are created; the current directory when unset.
    pub output_dir: Option<PathBuf>,
    /// Prefix for suggested module paths, e.g. `github.com/acme`.
    pub module_prefix: Option<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            language: "go".into(),
            cache: false,
            docker: true,
            example_module: true,
            output_dir: None,
            module_prefix: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`; `--output-format` wins.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Payload override directory layered over the built-in payloads.
    pub local_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// An explicit `config_file` must exist; the per-user file and
    /// `.strata.toml` are optional.
    pub fn load(config_file: Option<&Path>) -> CliResult<Self> {
        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;

        let (user_file, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %user_file.display(), required, "loading configuration");

        let config = Config::builder()
            .add_source(defaults)
            .add_source(File::from(user_file).required(required))
            .add_source(File::from(PathBuf::from(LOCAL_CONFIG_FILE)).required(false))
            .add_source(
                Environment::with_prefix("STRATA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_error)?;

        config.try_deserialize().map_err(config_error)
    }

    /// Path to the per-user configuration file.
    ///
    /// Falls back to `.strata.toml` in the current directory when no home
    /// directory can be determined.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "strata", "strata")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Look up a dotted key such as `defaults.cache`.
    pub fn get(&self, key: &str) -> CliResult<String> {
        let value = toml::Value::try_from(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })?;

        let mut current = &value;
        for part in key.split('.') {
            current = current.get(part).ok_or_else(|| CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            })?;
        }

        Ok(match current {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

fn config_error(err: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}
