use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::RosterEntry;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RosterEntryDto {
    pub user_id: String,
    pub email: String,
    /// `employee` or `admin`
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<RosterEntry> for RosterEntryDto {
    fn from(e: RosterEntry) -> Self {
        Self {
            user_id: e.user_id,
            email: e.email,
            role: e.role.as_str().to_string(),
            created_at: e.created_at,
        }
    }
}
