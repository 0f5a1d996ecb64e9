//! Configuration management for ISPA Predict
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.ispa/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{IspaError, Result};
use crate::model::ModelStore;

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Artifact and history file locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub model: String,
    pub encoder: String,
    pub history: String,
}

/// Terminal output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color_output: bool,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            model: "model_naive_bayes.json".to_string(),
            encoder: "label_encoder.json".to_string(),
            history: "riwayat_prediksi.csv".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color_output: true }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| IspaError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| IspaError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from the standard location, or built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard configuration location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".ispa").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("paths.model", &self.paths.model),
            ("paths.encoder", &self.paths.encoder),
            ("paths.history", &self.paths.history),
        ] {
            if value.trim().is_empty() {
                return Err(IspaError::ConfigError(format!("{} must not be empty", key)));
            }
        }

        Ok(())
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    pub fn model_path(&self) -> PathBuf {
        Self::expand_path(&self.paths.model)
    }

    pub fn encoder_path(&self) -> PathBuf {
        Self::expand_path(&self.paths.encoder)
    }

    pub fn history_path(&self) -> PathBuf {
        Self::expand_path(&self.paths.history)
    }

    /// Model store over the configured artifacts, not yet loaded
    pub fn model_store(&self) -> ModelStore {
        ModelStore::new(self.model_path(), self.encoder_path())
    }
}
