//! Policy rule handlers

use super::models::{LookupQuery, RuleListQuery, RuleRequest};
use crate::server::routes::{ApiResponse, PaginatedResponse, Pagination};
use crate::server::state::AppState;
use crate::utils::error::AdminError;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde_json::json;
use tracing::{info, warn};

/// List rules, optionally filtered by `ptype`
pub async fn list_rules(
    state: web::Data<AppState>,
    query: web::Query<RuleListQuery>,
) -> ActixResult<HttpResponse> {
    let ptype = query.ptype()?;
    let pagination = Pagination::from_query(query.page, query.per_page)?;

    let (rules, total) = state
        .db
        .list_rules(ptype, pagination.page, pagination.per_page)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Casbin rules retrieved successfully",
        PaginatedResponse::new(rules, pagination, total),
    )))
}

/// Create a `p` or `g` rule
pub async fn create_rule(
    state: web::Data<AppState>,
    body: web::Json<RuleRequest>,
) -> ActixResult<HttpResponse> {
    let rule = body.to_rule()?;

    if !state.enforcer.add_rule(&rule).await? {
        warn!("Rejected duplicate rule: {}", rule);
        return Err(AdminError::rule_conflict("Rule already exists or could not be added").into());
    }

    let row = state
        .db
        .find_rule_by_tuple(&rule)
        .await?
        .ok_or_else(|| AdminError::internal("Created rule could not be read back"))?;

    info!("Casbin rule {} created: {}", row.id, rule);
    Ok(HttpResponse::Created().json(ApiResponse::success("Casbin rule created successfully", row)))
}

/// Show one rule
pub async fn get_rule(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ActixResult<HttpResponse> {
    let row = state
        .db
        .find_rule(path.into_inner())
        .await?
        .ok_or_else(|| AdminError::not_found("Casbin rule not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Casbin rule retrieved successfully", row)))
}

/// Replace a rule with the request merged over it
pub async fn update_rule(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<RuleRequest>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let row = state
        .db
        .find_rule(id)
        .await?
        .ok_or_else(|| AdminError::not_found("Casbin rule not found"))?;

    let current = row.to_rule()?;
    let updated = body.merge_over(&current)?;

    if !state.enforcer.replace_policy(&current, &updated).await? {
        warn!("Rule {} could not be replaced by {}", id, updated);
        return Err(AdminError::rule_conflict("Failed to update rule").into());
    }

    let row = state
        .db
        .find_rule(id)
        .await?
        .ok_or_else(|| AdminError::not_found("Casbin rule not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Casbin rule updated successfully", row)))
}

/// Delete a rule
pub async fn delete_rule(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let row = state
        .db
        .find_rule(id)
        .await?
        .ok_or_else(|| AdminError::not_found("Casbin rule not found"))?;

    let rule = row.to_rule()?;
    if !state.enforcer.remove_rule(&rule).await? {
        return Err(AdminError::rule_conflict("Failed to delete rule").into());
    }

    Ok(HttpResponse::Ok().json(ApiResponse::message("Casbin rule deleted successfully")))
}

/// Permissions held by a subject
pub async fn policies_for_subject(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<LookupQuery>,
) -> ActixResult<HttpResponse> {
    let subject = path.into_inner();
    let implicit = query.implicit()?;

    let policies = if implicit {
        state
            .enforcer
            .get_implicit_permissions_for_user(&subject)
            .await?
    } else {
        state.enforcer.get_permissions_for_user(&subject).await?
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Policies retrieved successfully",
        json!({ "subject": subject, "implicit": implicit, "policies": policies }),
    )))
}

/// Roles held by a user
pub async fn roles_for_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<LookupQuery>,
) -> ActixResult<HttpResponse> {
    let user = path.into_inner();
    let implicit = query.implicit()?;

    let roles = if implicit {
        state.enforcer.get_implicit_roles_for_user(&user).await?
    } else {
        state.enforcer.get_roles_for_user(&user).await?
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Roles retrieved successfully",
        json!({ "user": user, "implicit": implicit, "roles": roles }),
    )))
}
