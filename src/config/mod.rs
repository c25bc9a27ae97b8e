//! Configuration management
//!
//! Configuration comes from a YAML file, falls back to defaults when the file
//! is absent, and is finally overridden by `RBAC_ADMIN_*` environment
//! variables (a `.env` file is honoured by the binary).

pub mod models;

pub use models::*;

use crate::utils::error::{AdminError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variable overriding `storage.database.url`
pub const ENV_DATABASE_URL: &str = "RBAC_ADMIN_DATABASE_URL";
/// Environment variable overriding `auth.jwt_secret`
pub const ENV_JWT_SECRET: &str = "RBAC_ADMIN_JWT_SECRET";
/// Environment variable overriding `server.host`
pub const ENV_HOST: &str = "RBAC_ADMIN_HOST";
/// Environment variable overriding `server.port`
pub const ENV_PORT: &str = "RBAC_ADMIN_PORT";

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AdminError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| AdminError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise start from defaults, then
    /// apply environment overrides and validate the result.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = if tokio::fs::try_exists(path).await.unwrap_or(false) {
            Self::from_file(path).await?
        } else {
            warn!("Config file {:?} not found, using defaults", path);
            Self::default()
        };

        let config = config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup
    pub fn apply_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_DATABASE_URL).filter(|v| !v.is_empty()) {
            debug!("Database URL overridden from environment");
            self.storage.database.url = url;
        }
        if let Some(secret) = lookup(ENV_JWT_SECRET).filter(|v| !v.is_empty()) {
            debug!("JWT secret overridden from environment");
            self.auth.jwt_secret = secret;
        }
        if let Some(host) = lookup(ENV_HOST).filter(|v| !v.is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!("Ignoring invalid {} value: {}", ENV_PORT, port),
            }
        }
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| AdminError::Config(format!("Server config error: {}", e)))?;

        self.storage
            .database
            .validate()
            .map_err(|e| AdminError::Config(format!("Database config error: {}", e)))?;

        self.auth
            .validate()
            .map_err(|e| AdminError::Config(format!("Auth config error: {}", e)))?;

        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| AdminError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
