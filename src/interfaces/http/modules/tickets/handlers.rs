//! Ticket API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    CreateTicketRequest, PriorityOption, TicketDto, TicketListQuery, TicketListResponse,
    UpdateStatusRequest, UpdateTicketRequest,
};
use crate::application::TicketService;
use crate::domain::TicketStatus;
use crate::interfaces::http::common::{
    domain_error, ApiError, ApiResponse, ApiResult, EmptyData, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct TicketHandlerState {
    pub tickets: Arc<TicketService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/tickets",
    tag = "Tickets",
    params(TicketListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Visible tickets, newest first, with status counts", body = ApiResponse<TicketListResponse>),
        (status = 400, description = "Unknown status filter")
    )
)]
pub async fn list_tickets(
    State(state): State<TicketHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<TicketListQuery>,
) -> ApiResult<TicketListResponse> {
    let actor = user.actor();
    let status = query.status().map_err(domain_error)?;
    let list = state
        .tickets
        .list(&actor, status)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(TicketListResponse {
        tickets: TicketDto::many(list.tickets, &actor),
        stats: list.stats.into(),
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/tickets",
    tag = "Tickets",
    request_body = CreateTicketRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Ticket submitted", body = ApiResponse<TicketDto>),
        (status = 400, description = "Blank issue text or unknown priority"),
        (status = 422, description = "Field validation failed")
    )
)]
pub async fn submit_ticket(
    State(state): State<TicketHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateTicketRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TicketDto>>), ApiError<TicketDto>> {
    let actor = user.actor();
    let form = request.into_domain().map_err(domain_error)?;
    let ticket = state
        .tickets
        .submit(&actor, form)
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(TicketDto::for_actor(ticket, &actor))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/tickets/priorities",
    tag = "Tickets",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Priority choices with help text", body = ApiResponse<Vec<PriorityOption>>)
    )
)]
pub async fn list_priorities() -> Json<ApiResponse<Vec<PriorityOption>>> {
    let options = TicketService::priorities()
        .iter()
        .copied()
        .map(PriorityOption::from)
        .collect();
    Json(ApiResponse::success(options))
}

#[utoipa::path(
    get,
    path = "/api/v1/tickets/{id}",
    tag = "Tickets",
    params(("id" = String, Path, description = "Ticket ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Ticket", body = ApiResponse<TicketDto>),
        (status = 404, description = "Ticket not found or not visible")
    )
)]
pub async fn get_ticket(
    State(state): State<TicketHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<TicketDto> {
    let actor = user.actor();
    let ticket = state.tickets.get(&actor, &id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(TicketDto::for_actor(ticket, &actor))))
}

#[utoipa::path(
    put,
    path = "/api/v1/tickets/{id}",
    tag = "Tickets",
    params(("id" = String, Path, description = "Ticket ID")),
    request_body = UpdateTicketRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Ticket updated", body = ApiResponse<TicketDto>),
        (status = 403, description = "Only the creator can edit"),
        (status = 404, description = "Ticket not found or not visible")
    )
)]
pub async fn update_ticket(
    State(state): State<TicketHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateTicketRequest>,
) -> ApiResult<TicketDto> {
    let actor = user.actor();
    let edit = request.into_domain().map_err(domain_error)?;
    let ticket = state
        .tickets
        .edit(&actor, &id, edit)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(TicketDto::for_actor(ticket, &actor))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tickets/{id}",
    tag = "Tickets",
    params(("id" = String, Path, description = "Ticket ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Ticket deleted", body = ApiResponse<EmptyData>),
        (status = 403, description = "Only the creator can delete"),
        (status = 404, description = "Ticket not found or not visible")
    )
)]
pub async fn delete_ticket(
    State(state): State<TicketHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<EmptyData> {
    state
        .tickets
        .delete(&user.actor(), &id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    put,
    path = "/api/v1/tickets/{id}/status",
    tag = "Tickets",
    params(("id" = String, Path, description = "Ticket ID")),
    request_body = UpdateStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<TicketDto>),
        (status = 400, description = "Unknown status"),
        (status = 403, description = "Administrators only"),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn update_status(
    State(state): State<TicketHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<TicketDto> {
    let actor = user.actor();
    let status = TicketStatus::parse(&request.status).map_err(domain_error)?;
    let ticket = state
        .tickets
        .change_status(&actor, &id, status)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(TicketDto::for_actor(ticket, &actor))))
}

#[utoipa::path(
    post,
    path = "/api/v1/tickets/{id}/done",
    tag = "Tickets",
    params(("id" = String, Path, description = "Ticket ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Ticket marked done", body = ApiResponse<TicketDto>),
        (status = 403, description = "Administrators only"),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn mark_done(
    State(state): State<TicketHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<TicketDto> {
    let actor = user.actor();
    let ticket = state
        .tickets
        .mark_done(&actor, &id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(TicketDto::for_actor(ticket, &actor))))
}
