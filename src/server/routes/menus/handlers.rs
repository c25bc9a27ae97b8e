//! Menu handlers

use super::models::{MenuListQuery, MenuRequest, MenuRolesRequest, TreeQuery};
use crate::auth::Identity;
use crate::server::routes::{ApiResponse, PaginatedResponse, Pagination};
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde_json::json;
use tracing::debug;

/// List menus with filters and pagination
pub async fn list_menus(
    state: web::Data<AppState>,
    query: web::Query<MenuListQuery>,
) -> ActixResult<HttpResponse> {
    let filter = query.filter()?;
    let pagination = Pagination::from_query(query.page, query.per_page)?;

    let (menus, total) = state
        .menus
        .list(&filter, pagination.page, pagination.per_page)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Menus retrieved successfully",
        PaginatedResponse::new(menus, pagination, total),
    )))
}

/// Create a menu
pub async fn create_menu(
    state: web::Data<AppState>,
    body: web::Json<MenuRequest>,
) -> ActixResult<HttpResponse> {
    let (new, roles) = body.to_new_menu()?;
    let menu = state.menus.create(new, roles).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success("Menu created successfully", menu)))
}

/// Show one menu with its parent, children and roles
pub async fn get_menu(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ActixResult<HttpResponse> {
    let menu = state.menus.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Menu retrieved successfully", menu)))
}

/// Partially update a menu
pub async fn update_menu(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<MenuRequest>,
) -> ActixResult<HttpResponse> {
    let (patch, roles) = body.to_patch()?;
    let menu = state.menus.update(path.into_inner(), patch, roles).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Menu updated successfully", menu)))
}

/// Delete a menu and everything below it
pub async fn delete_menu(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ActixResult<HttpResponse> {
    let deleted = state.menus.delete(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Menu deleted successfully",
        json!({ "deleted": deleted }),
    )))
}

/// Replace the role set of a menu
pub async fn set_menu_roles(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<MenuRolesRequest>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let roles = body.roles()?;
    state.menus.set_roles(id, &roles).await?;

    let menu = state.menus.get(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Menu roles updated successfully", menu)))
}

/// Active two-level tree, optionally for one role
pub async fn menu_tree(
    state: web::Data<AppState>,
    query: web::Query<TreeQuery>,
) -> ActixResult<HttpResponse> {
    let role = query.role();
    let tree = state.menus.tree(role.as_deref()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Menu tree retrieved successfully", tree)))
}

/// Sidebar of the calling identity
pub async fn sidebar(
    state: web::Data<AppState>,
    identity: Identity,
) -> ActixResult<HttpResponse> {
    let sidebar = state.menus.sidebar_for(&identity).await?;
    debug!(
        "Sidebar for {} has {} entries",
        identity.subject,
        sidebar.menus.len()
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Sidebar menus retrieved successfully",
        sidebar,
    )))
}
