//! Configuration management
//!
//! Priority for the API URL: TPQ_URL environment variable > config.toml

use super::Result;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const URL_ENV_VAR: &str = "TPQ_URL";

/// Application configuration
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// API base URL
    pub url: Option<String>,
    /// HTTP timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// Page size applied by the CLI when no --limit is given
    pub default_per_page: Option<u32>,
}

impl Config {
    /// Load configuration from file, or defaults when it does not exist
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: format!("Failed to parse config file: {}", e),
            })?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or(StorageError::ConfigDirNotFound)?;

        Ok(home_dir.join(".config").join("tpq").join("config.toml"))
    }

    /// URL from the environment, falling back to the file
    pub fn get_url(&self) -> Option<String> {
        std::env::var(URL_ENV_VAR)
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| self.url.clone())
    }

    pub fn set_url(&mut self, url: String) {
        self.url = Some(url);
    }
}
