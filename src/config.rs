//! Application configuration.
//!
//! Supports YAML file and environment variable overrides.

use serde::Deserialize;

use crate::advice::ReadMode;
use crate::error::Result;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "interception.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "INTERCEPTION_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "INTERCEPTION";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "INTERCEPTION_LOG";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Timer advice configuration.
    pub timer: TimerConfig,
    /// Demo binary configuration.
    pub demo: DemoConfig,
}

/// Timer advice configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Whether the stopwatch is stopped before its reading is reported.
    pub read_mode: ReadMode,
}

/// Demo binary configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Wait for a key press before exiting.
    pub wait_for_key: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { wait_for_key: true }
    }
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `interception.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix, `__` separated
    ///    (e.g. `INTERCEPTION__TIMER__READ_MODE=running`)
    pub fn load(path: Option<&str>) -> Result<Self> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| crate::error::Error::Config(e.to_string()))
    }
}
