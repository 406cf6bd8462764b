use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::interfaces::http::modules::admin::RosterEntryDto;
use crate::interfaces::http::modules::tickets::{TicketDto, TicketStatsDto};

/// Tagged by `view`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum DashboardResponse {
    /// The caller's own tickets
    Employee {
        tickets: Vec<TicketDto>,
        stats: TicketStatsDto,
    },
    /// Tickets that are not done, plus the user roster
    Admin {
        tickets: Vec<TicketDto>,
        stats: TicketStatsDto,
        roster: Vec<RosterEntryDto>,
    },
}
