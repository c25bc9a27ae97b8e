//! Helper functions for creating specific error types

use super::types::AdminError;
use crate::utils::validation::FieldErrors;

/// Helper functions for creating specific errors
impl AdminError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn rule_conflict<S: Into<String>>(message: S) -> Self {
        Self::RuleConflict(message.into())
    }

    pub fn invalid_rule<S: Into<String>>(message: S) -> Self {
        Self::InvalidRule(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Validation failure on a single field
    pub fn validation<F: Into<String>, S: Into<String>>(field: F, message: S) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        Self::Validation(errors)
    }

    /// Whether the error is the caller's fault rather than a server fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized(_)
                | Self::AccessDenied
                | Self::NoRole
                | Self::Validation(_)
                | Self::NotFound(_)
                | Self::RuleConflict(_)
                | Self::InvalidRule(_)
                | Self::Jwt(_)
        )
    }
}
