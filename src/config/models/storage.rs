//! Storage configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL (`sqlite://...` or `postgres://...`)
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Maximum connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
    /// Run pending migrations when the server starts
    #[serde(default = "default_true")]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            connection_timeout: default_connection_timeout(),
            auto_migrate: true,
        }
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.url.trim().is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }

        if !(self.url.starts_with("sqlite:")
            || self.url.starts_with("postgres://")
            || self.url.starts_with("postgresql://"))
        {
            return Err(format!("Unsupported database URL scheme: {}", self.url));
        }

        if self.max_connections == 0 {
            return Err("Max connections must be at least 1".to_string());
        }

        Ok(())
    }
}

fn default_database_url() -> String {
    "sqlite://data/rbac-admin.db?mode=rwc".to_string()
}
