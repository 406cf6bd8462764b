use async_trait::async_trait;

use super::{User, UserRole};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> DomainResult<()>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    /// All user records, ordered by email
    async fn list(&self) -> DomainResult<Vec<User>>;

    async fn set_role(&self, id: &str, role: UserRole) -> DomainResult<()>;
}

/// The admin membership set. Membership alone makes a user an admin.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn is_admin(&self, user_id: &str) -> DomainResult<bool>;

    /// Add to the set. Granting an existing member is a no-op.
    async fn grant(&self, user_id: &str) -> DomainResult<()>;

    /// Remove from the set. Returns whether the user was a member.
    async fn revoke(&self, user_id: &str) -> DomainResult<bool>;

    async fn list_ids(&self) -> DomainResult<Vec<String>>;
}
