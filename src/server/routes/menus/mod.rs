//! Menu endpoints

mod handlers;
mod models;

pub use handlers::{
    create_menu, delete_menu, get_menu, list_menus, menu_tree, set_menu_roles, sidebar,
    update_menu,
};
pub use models::{MenuListQuery, MenuRequest, MenuRolesRequest, TreeQuery};

use crate::server::middleware::Authorize;
use actix_web::web;

/// Configure menu routes.
///
/// The sidebar only needs an authenticated identity, so it is registered
/// ahead of the guarded scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/menus/sidebar").route(web::get().to(sidebar)))
        .service(
            web::scope("/menus")
                .wrap(Authorize::resource("menus"))
                .route("", web::get().to(list_menus))
                .route("", web::post().to(create_menu))
                .route("/tree", web::get().to(menu_tree))
                .route("/{id}", web::get().to(get_menu))
                .route("/{id}", web::put().to(update_menu))
                .route("/{id}", web::patch().to(update_menu))
                .route("/{id}", web::delete().to(delete_menu))
                .route("/{id}/roles", web::put().to(set_menu_roles)),
        );
}
