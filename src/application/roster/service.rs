use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::{Actor, DomainError, DomainResult, RepositoryProvider, UserRole};

/// One row of the admin roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub user_id: String,
    pub email: String,
    /// Resolved from admin-set membership, not from the stored record
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

pub struct RosterService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RosterService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Every user record ordered by email. Admin only.
    pub async fn list_roster(&self, actor: &Actor) -> DomainResult<Vec<RosterEntry>> {
        ensure_admin(actor)?;

        let admins: HashSet<String> = self.repos.admins().list_ids().await?.into_iter().collect();
        let users = self.repos.users().list().await?;

        Ok(users
            .into_iter()
            .map(|u| RosterEntry {
                role: if admins.contains(&u.id) {
                    UserRole::Admin
                } else {
                    UserRole::Employee
                },
                user_id: u.id,
                email: u.email,
                created_at: u.created_at,
            })
            .collect())
    }

    /// Add a user to the admin set. Applies to their next request.
    pub async fn grant_admin(&self, actor: &Actor, user_id: &str) -> DomainResult<RosterEntry> {
        ensure_admin(actor)?;
        let mut user = self
            .repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(user_id))?;

        self.repos.admins().grant(user_id).await?;
        self.repos.users().set_role(user_id, UserRole::Admin).await?;
        user.role = UserRole::Admin;

        info!(user_id, granted_by = %actor.email, "Admin access granted");
        Ok(RosterEntry {
            user_id: user.id,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        })
    }

    /// Remove a user from the admin set. Admins cannot revoke themselves.
    pub async fn revoke_admin(&self, actor: &Actor, user_id: &str) -> DomainResult<RosterEntry> {
        ensure_admin(actor)?;
        if actor.user_id == user_id {
            return Err(DomainError::Validation(
                "You cannot revoke your own admin access".into(),
            ));
        }

        let mut user = self
            .repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(user_id))?;

        if !self.repos.admins().revoke(user_id).await? {
            return Err(DomainError::Conflict(format!("{} is not an admin", user.email)));
        }
        self.repos.users().set_role(user_id, UserRole::Employee).await?;
        user.role = UserRole::Employee;

        info!(user_id, revoked_by = %actor.email, "Admin access revoked");
        Ok(RosterEntry {
            user_id: user.id,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        })
    }
}

fn ensure_admin(actor: &Actor) -> DomainResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(DomainError::Forbidden("Administrator access required".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::infrastructure::InMemoryRepositoryProvider;

    async fn seeded() -> (RosterService, Arc<dyn RepositoryProvider>) {
        let repos = InMemoryRepositoryProvider::shared();
        for (id, email) in [("u1", "zed@corp.com"), ("u2", "amy@corp.com"), ("root", "root@corp.com")] {
            repos.users().create(User::employee(id, email)).await.unwrap();
        }
        repos.admins().grant("root").await.unwrap();
        (RosterService::new(repos.clone()), repos)
    }

    fn root() -> Actor {
        Actor::new("root", "root@corp.com", UserRole::Admin)
    }

    #[tokio::test]
    async fn roster_uses_admin_set_and_orders_by_email() {
        let (svc, _) = seeded().await;
        let roster = svc.list_roster(&root()).await.unwrap();

        let emails: Vec<&str> = roster.iter().map(|e| e.email.as_str()).collect();
        assert_eq!(emails, ["amy@corp.com", "root@corp.com", "zed@corp.com"]);

        // the root record still says employee; membership decides
        assert_eq!(roster[1].role, UserRole::Admin);
        assert_eq!(roster[0].role, UserRole::Employee);
    }

    #[tokio::test]
    async fn employees_cannot_see_roster() {
        let (svc, _) = seeded().await;
        let amy = Actor::new("u2", "amy@corp.com", UserRole::Employee);
        assert!(matches!(
            svc.list_roster(&amy).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(svc.grant_admin(&amy, "u2").await.is_err());
    }

    #[tokio::test]
    async fn grant_and_revoke_update_membership_and_record() {
        let (svc, repos) = seeded().await;

        let entry = svc.grant_admin(&root(), "u1").await.unwrap();
        assert_eq!(entry.role, UserRole::Admin);
        assert!(repos.admins().is_admin("u1").await.unwrap());
        assert_eq!(
            repos.users().find_by_id("u1").await.unwrap().unwrap().role,
            UserRole::Admin
        );

        let entry = svc.revoke_admin(&root(), "u1").await.unwrap();
        assert_eq!(entry.role, UserRole::Employee);
        assert!(!repos.admins().is_admin("u1").await.unwrap());
        assert!(matches!(
            svc.revoke_admin(&root(), "u1").await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn admin_cannot_revoke_self() {
        let (svc, repos) = seeded().await;
        assert!(matches!(
            svc.revoke_admin(&root(), "root").await,
            Err(DomainError::Validation(_))
        ));
        assert!(repos.admins().is_admin("root").await.unwrap());
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (svc, _) = seeded().await;
        assert!(matches!(
            svc.grant_admin(&root(), "ghost").await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
