//! Layered runtime settings

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};
use dms::{DmsConfig, DmsError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default settings file, looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "drowsiness";

/// Environment variable prefix (`DROWSY_DETECTOR__EAR_THRESHOLD=0.2`)
pub const ENV_PREFIX: &str = "DROWSY";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid detector settings: {0}")]
    Invalid(#[from] DmsError),
}

/// Monitor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log verbosity (trace, debug, info, warn, error)
    pub log_level: String,

    /// Replay input path, `-` for stdin
    pub input: String,

    /// Detector tuning
    pub detector: DmsConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            input: "-".to_string(),
            detector: DmsConfig::default(),
        }
    }
}

impl Settings {
    /// Defaults, then the settings file, then `DROWSY_*` environment variables.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_SETTINGS_FILE).required(false),
        };
        Self::build(config::Config::builder().add_source(file))
    }

    /// Defaults, then TOML text, then environment variables
    pub fn from_toml(toml: &str) -> Result<Self, SettingsError> {
        Self::build(config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: Settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.detector.validate()?;
        Ok(settings)
    }
}
