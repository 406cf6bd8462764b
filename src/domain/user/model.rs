use chrono::{DateTime, Utc};

use crate::domain::normalize_email;

/// User role.
///
/// Never supplied by a client: it is resolved from the admin membership
/// set on every authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserRole {
    #[default]
    Employee,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User record
#[derive(Clone, Debug)]
pub struct User {
    /// Same id as the identity-provider account
    pub id: String,
    pub email: String,
    /// Mirror of the resolved role, kept in sync on login and on grant/revoke
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Default record created at registration or first login
    pub fn employee(id: impl Into<String>, email: &str) -> Self {
        Self {
            id: id.into(),
            email: normalize_email(email),
            role: UserRole::Employee,
            created_at: Utc::now(),
        }
    }
}

/// The authenticated caller of a use case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    /// Normalized email, compared against `Ticket::created_by`
    pub email: String,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, email: &str, role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            email: normalize_email(email),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_defaults_to_employee() {
        assert_eq!(UserRole::default(), UserRole::Employee);
        assert_eq!(UserRole::Admin.to_string(), "admin");
        assert!(!UserRole::Employee.is_admin());
    }

    #[test]
    fn actor_email_is_normalized() {
        let actor = Actor::new("u1", " Bob@Corp.com", UserRole::Employee);
        assert_eq!(actor.email, "bob@corp.com");
        assert!(!actor.is_admin());
    }
}
