use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use super::dto::DashboardResponse;
use crate::application::{Dashboard, DashboardService};
use crate::interfaces::http::common::{domain_error, ApiResponse, ApiResult};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::tickets::TicketDto;

#[derive(Clone)]
pub struct DashboardHandlerState {
    pub dashboard: Arc<DashboardService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Employee or admin landing view", body = ApiResponse<DashboardResponse>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_dashboard(
    State(state): State<DashboardHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<DashboardResponse> {
    let actor = user.actor();
    let view = state
        .dashboard
        .for_actor(&actor)
        .await
        .map_err(domain_error)?;

    let response = match view {
        Dashboard::Employee { tickets } => DashboardResponse::Employee {
            tickets: TicketDto::many(tickets.tickets, &actor),
            stats: tickets.stats.into(),
        },
        Dashboard::Admin { tickets, roster } => DashboardResponse::Admin {
            tickets: TicketDto::many(tickets.tickets, &actor),
            stats: tickets.stats.into(),
            roster: roster.into_iter().map(Into::into).collect(),
        },
    };

    Ok(Json(ApiResponse::success(response)))
}
