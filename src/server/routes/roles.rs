//! Role listing

use crate::server::routes::ApiResponse;
use crate::server::middleware::Authorize;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::debug;

/// Configure role routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/roles")
            .wrap(Authorize::resource("roles"))
            .route("", web::get().to(list_roles)),
    );
}

/// List every known role
pub async fn list_roles(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let roles = state.db.list_roles().await?;
    debug!("Returning {} roles", roles.len());
    Ok(HttpResponse::Ok().json(ApiResponse::success("Roles retrieved successfully", roles)))
}
