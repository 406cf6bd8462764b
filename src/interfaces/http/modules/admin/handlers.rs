//! Admin API handlers. Mounted behind `admin_middleware`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use super::dto::RosterEntryDto;
use crate::application::RosterService;
use crate::interfaces::http::common::{domain_error, ApiResponse, ApiResult};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct AdminHandlerState {
    pub roster: Arc<RosterService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Users with their resolved roles, by email", body = ApiResponse<Vec<RosterEntryDto>>),
        (status = 403, description = "Administrators only")
    )
)]
pub async fn list_users(
    State(state): State<AdminHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Vec<RosterEntryDto>> {
    let roster = state
        .roster
        .list_roster(&user.actor())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        roster.into_iter().map(RosterEntryDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/users/{id}/admin",
    tag = "Admin",
    params(("id" = String, Path, description = "User ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Admin access granted; applies to the user's next request", body = ApiResponse<RosterEntryDto>),
        (status = 404, description = "User not found")
    )
)]
pub async fn grant_admin(
    State(state): State<AdminHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<RosterEntryDto> {
    let entry = state
        .roster
        .grant_admin(&user.actor(), &id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(entry.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/users/{id}/admin",
    tag = "Admin",
    params(("id" = String, Path, description = "User ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Admin access revoked", body = ApiResponse<RosterEntryDto>),
        (status = 400, description = "Cannot revoke your own access"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User is not an admin")
    )
)]
pub async fn revoke_admin(
    State(state): State<AdminHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<RosterEntryDto> {
    let entry = state
        .roster
        .revoke_admin(&user.actor(), &id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(entry.into())))
}
