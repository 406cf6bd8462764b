use chrono::{DateTime, Utc};

/// Credential record owned by the identity provider.
///
/// The id is shared with the user record so both sides can be joined
/// without a lookup by email.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    /// Normalized email
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
}
