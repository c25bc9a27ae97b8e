//! Authentication configuration

use super::*;
use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT secret
    #[serde(default = "generate_secure_jwt_secret")]
    pub jwt_secret: String,
    /// JWT expiration in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration: u64,
    /// Token issuer
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// RBAC configuration
    #[serde(default)]
    pub rbac: RbacConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: generate_secure_jwt_secret(),
            jwt_expiration: default_jwt_expiration(),
            issuer: default_issuer(),
            rbac: RbacConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long for security".to_string());
        }

        if self.jwt_secret == "your-secret-key" || self.jwt_secret == "change-me" {
            return Err("JWT secret must not use default values".to_string());
        }

        if self.jwt_expiration < 300 {
            return Err("JWT expiration should be at least 5 minutes (300 seconds)".to_string());
        }

        if self.jwt_expiration > 86400 * 30 {
            return Err("JWT expiration should not exceed 30 days".to_string());
        }

        if self.issuer.trim().is_empty() {
            return Err("Token issuer cannot be empty".to_string());
        }

        Ok(())
    }
}

/// RBAC configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Enforce policies on protected resources
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seed the default roles and policies at startup
    #[serde(default = "default_true")]
    pub seed_defaults: bool,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            seed_defaults: true,
        }
    }
}

/// Generate a secure random JWT secret
fn generate_secure_jwt_secret() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Warn about configurations that weaken access control
pub fn warn_insecure_config(config: &AuthConfig) {
    if !config.rbac.enabled {
        warn!(
            "RBAC enforcement is disabled! \
             Every authenticated caller can reach every protected resource."
        );
    }
}
