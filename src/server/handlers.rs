//! Extractor error handlers
//!
//! Malformed bodies, query strings and path segments are rendered through
//! [`AdminError`] so they share the response envelope.

use crate::server::routes::malformed_request;
use crate::utils::error::AdminError;
use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{Error, HttpRequest};
use tracing::debug;

/// Invalid JSON body → 422
pub fn json_error(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("Rejected body for {}: {}", req.path(), err);
    malformed_request("body", err).into()
}

/// Invalid query string → 422
pub fn query_error(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("Rejected query for {}: {}", req.path(), err);
    malformed_request("query", err).into()
}

/// Unparseable path segment, such as a non-numeric id → 404
pub fn path_error(err: PathError, req: &HttpRequest) -> Error {
    debug!("Rejected path {}: {}", req.path(), err);
    AdminError::not_found("Resource not found").into()
}

/// Fallback for unmatched routes
pub async fn route_not_found() -> actix_web::Result<actix_web::HttpResponse> {
    Err(AdminError::not_found("Route not found").into())
}
