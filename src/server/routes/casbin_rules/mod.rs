//! Policy rule administration endpoints

mod handlers;
mod models;

pub use handlers::{
    create_rule, delete_rule, get_rule, list_rules, policies_for_subject, roles_for_user,
    update_rule,
};
pub use models::{LookupQuery, RuleListQuery, RuleRequest};

use crate::server::middleware::Authorize;
use actix_web::web;

/// Configure policy rule routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/casbin-rules")
            .wrap(Authorize::resource("casbin-rules"))
            .route("", web::get().to(list_rules))
            .route("", web::post().to(create_rule))
            .route(
                "/subject/{subject}/policies",
                web::get().to(policies_for_subject),
            )
            .route("/user/{user}/roles", web::get().to(roles_for_user))
            .route("/{id}", web::get().to(get_rule))
            .route("/{id}", web::put().to(update_rule))
            .route("/{id}", web::patch().to(update_rule))
            .route("/{id}", web::delete().to(delete_rule)),
    );
}
