//! HTTP response handling for errors

use super::types::AdminError;
use crate::server::routes::ApiResponse;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

impl ResponseError for AdminError {
    fn status_code(&self) -> StatusCode {
        match self {
            AdminError::Unauthorized(_) | AdminError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AdminError::AccessDenied => StatusCode::FORBIDDEN,
            AdminError::NoRole | AdminError::NotFound(_) => StatusCode::NOT_FOUND,
            AdminError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AdminError::RuleConflict(_) | AdminError::InvalidRule(_) => StatusCode::BAD_REQUEST,
            AdminError::Config(_)
            | AdminError::Database(_)
            | AdminError::Serialization(_)
            | AdminError::Yaml(_)
            | AdminError::Io(_)
            | AdminError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (message, detail) = match self {
            AdminError::Unauthorized(msg) => (msg.clone(), None),
            AdminError::Jwt(_) => ("Invalid or expired token".to_string(), None),
            AdminError::AccessDenied => ("Access denied".to_string(), None),
            AdminError::NoRole => ("User role not found".to_string(), None),
            AdminError::NotFound(msg) => (msg.clone(), None),
            AdminError::Validation(errors) => (
                "The given data was invalid".to_string(),
                Some(errors.to_string()),
            ),
            AdminError::RuleConflict(msg) => (msg.clone(), None),
            AdminError::InvalidRule(msg) => ("Invalid rule".to_string(), Some(msg.clone())),
            AdminError::Database(e) => {
                error!("Database operation failed: {}", e);
                (
                    "Database operation failed".to_string(),
                    Some("The operation was rolled back".to_string()),
                )
            }
            other => {
                error!("Internal error: {}", other);
                ("An internal error occurred".to_string(), None)
            }
        };

        let mut body = ApiResponse::<()>::failure(message, detail);
        if let AdminError::Validation(errors) = self {
            body = body.with_field_errors(errors.clone());
        }

        HttpResponse::build(self.status_code()).json(body)
    }
}
