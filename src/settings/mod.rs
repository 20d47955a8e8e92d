// Configuration management and serialization
use serde::Deserialize;
use std::path::{Path, PathBuf};
use config::{Config, ConfigError, Environment, File};

/// Where checkpoints are cached
#[derive(Debug, Deserialize, Clone)]
pub struct WeightsConfig {
    /// Directory the base framework downloads checkpoints into
    pub directory: PathBuf,
}

/// Defaults applied to every model built from the CLI
#[derive(Debug, Deserialize, Clone)]
pub struct ModelDefaults {
    /// Device the base framework places the model on (cpu, cuda, mps)
    pub device: String,
}

/// Configuration for application logging
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    pub level: String,
    /// Optional log directory
    pub file: Option<PathBuf>,
}

/// Main settings struct that contains all configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub weights: WeightsConfig,
    pub model: ModelDefaults,
    pub logging: LoggingConfig,
}

impl Settings {
    /// Loads settings from `./config`.
    ///
    /// Sources in order of precedence (highest to lowest):
    /// 1. Environment variables prefixed with RFDETR_PLUS_, sections split by
    ///    a double underscore (RFDETR_PLUS_WEIGHTS__DIRECTORY)
    /// 2. Local config file (local.toml) if present
    /// 3. Default config file (default.toml) if present
    /// 4. Built-in defaults
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::current_dir()
            .map_err(|e| ConfigError::Message(
                format!("Failed to get current directory: {}", e)
            ))?
            .join("config");

        Self::from_dir(&config_dir)
    }

    /// Loads settings from an explicit config directory.
    pub fn from_dir(config_dir: &Path) -> Result<Self, ConfigError> {
        let default_config = config_dir.join("default.toml");
        let local_config = config_dir.join("local.toml");

        let settings = Config::builder()
            .set_default("weights.directory", ".")?
            .set_default("model.device", "cpu")?
            .set_default("logging.level", "info")?
            .add_source(File::from(default_config).required(false))
            .add_source(File::from(local_config).required(false))
            // RFDETR_PLUS_MODEL__DEVICE=cuda sets model.device
            .add_source(
                Environment::with_prefix("RFDETR_PLUS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.model.device.trim().is_empty() {
            return Err(ConfigError::Message(
                "model.device must not be empty".to_string()
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            _ => Err(ConfigError::Message(
                format!("Invalid logging level: {}. Must be one of: error, warn, info, debug, trace",
                    self.logging.level)
            )),
        }?;

        // Create log directory if configured and doesn't exist
        if let Some(log_dir) = &self.logging.file {
            if !log_dir.exists() {
                std::fs::create_dir_all(log_dir).map_err(|e| {
                    ConfigError::Message(format!(
                        "Failed to create log directory at {}: {}",
                        log_dir.display(), e
                    ))
                })?;
            }
        }

        Ok(())
    }
}
