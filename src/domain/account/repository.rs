use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Account, NewAccount};
use crate::domain::DomainResult;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Create an account. Fails with `Conflict` if the email is taken.
    async fn create(&self, account: NewAccount) -> DomainResult<Account>;

    /// Look up by normalized email
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Account>>;

    async fn update_password(&self, id: &str, password_hash: &str) -> DomainResult<()>;
    async fn record_login(&self, id: &str, at: DateTime<Utc>) -> DomainResult<()>;
}
