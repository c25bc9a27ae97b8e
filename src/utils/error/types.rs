//! Error types for the admin backend

use crate::utils::validation::FieldErrors;
use thiserror::Error;

/// Result type alias for the admin backend
pub type Result<T> = std::result::Result<T, AdminError>;

/// Main error type for the admin backend
#[derive(Error, Debug)]
pub enum AdminError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors (persistence failures)
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Missing or unusable credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Enforcement denied the request, or the identity carries no role
    #[error("Access denied")]
    AccessDenied,

    /// The authenticated identity has no role attached
    #[error("User role not found")]
    NoRole,

    /// Malformed or missing request fields
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    /// Referenced rule, menu or role does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rule already exists on add, or is absent on remove
    #[error("Rule conflict: {0}")]
    RuleConflict(String),

    /// Structurally incomplete rule reached the policy engine
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
