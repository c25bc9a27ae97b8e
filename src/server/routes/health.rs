//! Health check endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, warn};

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health report
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub database: bool,
    pub rbac_enabled: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub build: crate::BuildInfo,
}

/// Liveness plus database reachability. Public.
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let database = match state.db.health_check().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Database health check failed: {}", e);
            false
        }
    };

    let status = HealthStatus {
        status: Cow::Borrowed(if database { "healthy" } else { "degraded" }),
        database,
        rbac_enabled: state.config.auth.rbac.enabled,
        timestamp: chrono::Utc::now(),
        build: crate::BuildInfo::current(),
    };

    if database {
        Ok(HttpResponse::Ok().json(ApiResponse::success("Service is running", status)))
    } else {
        let mut response = ApiResponse::success("Database unreachable", status);
        response.success = false;
        Ok(HttpResponse::ServiceUnavailable().json(response))
    }
}
