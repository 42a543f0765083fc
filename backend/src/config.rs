//! Startup configuration.
//!
//! Read from a YAML file whose path comes from `TALKING_ANIMALS_CONFIG`, or
//! `talking_animals.yaml` in the working directory when that exists. Every
//! field is optional. `TALKING_ANIMALS_BIND` and `TALKING_ANIMALS_DATA_DIR`
//! override the file.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::domain::DEFAULT_MAX_LEVEL;
use crate::storage::FileConnection;

pub const CONFIG_PATH_ENV: &str = "TALKING_ANIMALS_CONFIG";
pub const BIND_ENV: &str = "TALKING_ANIMALS_BIND";
pub const DATA_DIR_ENV: &str = "TALKING_ANIMALS_DATA_DIR";
pub const DEFAULT_CONFIG_FILE: &str = "talking_animals.yaml";

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Invalid bind address '{0}'")]
    InvalidBindAddress(String),
    #[error("max_level must be at least 1")]
    InvalidMaxLevel,
    #[error("allowed_origin cannot be empty")]
    EmptyAllowedOrigin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_address: String,
    /// `None` means the platform documents folder (redirect file honoured)
    pub data_directory: Option<PathBuf>,
    /// JSON roster; the built-in farm is used when unset
    pub roster_path: Option<PathBuf>,
    pub max_level: u32,
    pub allowed_origin: String,
    /// Built frontend served for every non-API path
    pub static_directory: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            data_directory: None,
            roster_path: None,
            max_level: DEFAULT_MAX_LEVEL,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            static_directory: None,
        }
    }
}

impl AppConfig {
    /// Load from the configured file (if any), then apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let path = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        };

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => {
                info!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(
            std::env::var(BIND_ENV).ok(),
            std::env::var(DATA_DIR_ENV).ok(),
        );
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config = Self::from_yaml(&yaml).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file deserializes to unit, not a map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    pub fn apply_overrides(&mut self, bind_address: Option<String>, data_directory: Option<String>) {
        if let Some(bind_address) = bind_address.filter(|value| !value.trim().is_empty()) {
            info!("Bind address overridden from environment: {}", bind_address);
            self.bind_address = bind_address;
        }
        if let Some(data_directory) = data_directory.filter(|value| !value.trim().is_empty()) {
            info!("Data directory overridden from environment: {}", data_directory);
            self.data_directory = Some(PathBuf::from(data_directory));
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        if self.max_level < 1 {
            return Err(ConfigError::InvalidMaxLevel);
        }
        if self.allowed_origin.trim().is_empty() {
            return Err(ConfigError::EmptyAllowedOrigin);
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_address
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(self.bind_address.clone()))
    }

    /// Directory the key-value files live in
    pub fn resolved_data_directory(&self) -> anyhow::Result<PathBuf> {
        match &self.data_directory {
            Some(dir) => Ok(dir.clone()),
            None => Ok(FileConnection::resolve_data_directory(
                FileConnection::default_data_directory()?,
            )),
        }
    }
}
