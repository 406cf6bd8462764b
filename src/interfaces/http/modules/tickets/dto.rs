//! Ticket DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{
    Actor, DomainResult, NewTicket, Ticket, TicketEdit, TicketPermissions, TicketPriority,
    TicketStats, TicketStatus,
};

/// Controls the caller may use on a ticket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct PermissionsDto {
    pub can_view: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_change_status: bool,
}

impl From<TicketPermissions> for PermissionsDto {
    fn from(p: TicketPermissions) -> Self {
        Self {
            can_view: p.can_view,
            can_edit: p.can_edit,
            can_delete: p.can_delete,
            can_change_status: p.can_change_status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TicketDto {
    pub id: String,
    pub title: String,
    pub description: String,
    /// `Low`, `Medium` or `High`
    #[schema(example = "Medium")]
    pub priority: String,
    /// `open`, `in progress` or `done`
    #[schema(example = "open")]
    pub status: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub permissions: PermissionsDto,
}

impl TicketDto {
    pub fn for_actor(ticket: Ticket, actor: &Actor) -> Self {
        let permissions = TicketPermissions::for_actor(actor, &ticket).into();
        Self {
            id: ticket.id,
            title: ticket.title,
            description: ticket.description,
            priority: ticket.priority.as_str().to_string(),
            status: ticket.status.as_str().to_string(),
            created_by: ticket.created_by,
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
            permissions,
        }
    }

    pub fn many(tickets: Vec<Ticket>, actor: &Actor) -> Vec<Self> {
        tickets
            .into_iter()
            .map(|t| Self::for_actor(t, actor))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct TicketStatsDto {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl From<TicketStats> for TicketStatsDto {
    fn from(s: TicketStats) -> Self {
        Self {
            total: s.total,
            open: s.open,
            in_progress: s.in_progress,
            done: s.done,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TicketListResponse {
    pub tickets: Vec<TicketDto>,
    pub stats: TicketStatsDto,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TicketListQuery {
    /// Only tickets with this status (`open`, `in progress`, `done`)
    pub status: Option<String>,
}

impl TicketListQuery {
    pub fn status(&self) -> DomainResult<Option<TicketStatus>> {
        self.status.as_deref().map(TicketStatus::parse).transpose()
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTicketRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    #[schema(example = "VPN disconnects")]
    pub title: String,
    #[validate(length(min = 1, max = 5000, message = "please describe the issue"))]
    #[schema(example = "The VPN drops every ten minutes since this morning")]
    pub description: String,
    /// Defaults to `Low`
    #[schema(example = "Medium")]
    pub priority: Option<String>,
}

impl CreateTicketRequest {
    pub fn into_domain(self) -> DomainResult<NewTicket> {
        Ok(NewTicket {
            priority: self.priority.as_deref().map(TicketPriority::parse).transpose()?,
            title: self.title,
            description: self.description,
        })
    }
}

/// Owner edit. Omitted fields stay unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTicketRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "please describe the issue"))]
    pub description: Option<String>,
    pub priority: Option<String>,
}

impl UpdateTicketRequest {
    pub fn into_domain(self) -> DomainResult<TicketEdit> {
        Ok(TicketEdit {
            priority: self.priority.as_deref().map(TicketPriority::parse).transpose()?,
            title: self.title,
            description: self.description,
        })
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1, message = "status is required"))]
    #[schema(example = "in progress")]
    pub status: String,
}

/// A priority choice with its help text
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PriorityOption {
    pub value: String,
    pub hint: String,
}

impl From<TicketPriority> for PriorityOption {
    fn from(p: TicketPriority) -> Self {
        Self {
            value: p.as_str().to_string(),
            hint: p.hint().to_string(),
        }
    }
}
