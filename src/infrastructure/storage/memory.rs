//! In-memory repositories for development and testing

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::{
    Account, AccountRepository, AdminRepository, DomainError, DomainResult, NewAccount,
    RepositoryProvider, Ticket, TicketQuery, TicketRepository, User, UserRepository, UserRole,
};

#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: DashMap<String, Account>,
    /// normalized email -> account id
    by_email: DashMap<String, String>,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, new: NewAccount) -> DomainResult<Account> {
        let id = uuid::Uuid::new_v4().to_string();

        match self.by_email.entry(new.email.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                return Err(DomainError::Conflict(format!(
                    "An account for {} already exists",
                    new.email
                )));
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(id.clone());
            }
        }

        let account = Account {
            id: id.clone(),
            email: new.email,
            password_hash: new.password_hash,
            created_at: Utc::now(),
            last_login_at: None,
        };
        self.accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let Some(id) = self.by_email.get(email).map(|r| r.value().clone()) else {
            return Ok(None);
        };
        Ok(self.accounts.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Account>> {
        Ok(self.accounts.get(id).map(|r| r.value().clone()))
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> DomainResult<()> {
        let mut account = self.accounts.get_mut(id).ok_or_else(|| DomainError::NotFound {
            entity: "Account",
            field: "id",
            value: id.to_string(),
        })?;
        account.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn record_login(&self, id: &str, at: DateTime<Utc>) -> DomainResult<()> {
        if let Some(mut account) = self.accounts.get_mut(id) {
            account.last_login_at = Some(at);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> DomainResult<()> {
        if self.users.contains_key(&user.id) {
            return Err(DomainError::Conflict(format!("User {} already exists", user.id)));
        }
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|r| r.value().clone()))
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|r| r.value().clone()).collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    async fn set_role(&self, id: &str, role: UserRole) -> DomainResult<()> {
        let mut user = self
            .users
            .get_mut(id)
            .ok_or_else(|| DomainError::user_not_found(id))?;
        user.role = role;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAdminRepository {
    members: DashMap<String, DateTime<Utc>>,
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn is_admin(&self, user_id: &str) -> DomainResult<bool> {
        Ok(self.members.contains_key(user_id))
    }

    async fn grant(&self, user_id: &str) -> DomainResult<()> {
        self.members
            .entry(user_id.to_string())
            .or_insert_with(Utc::now);
        Ok(())
    }

    async fn revoke(&self, user_id: &str) -> DomainResult<bool> {
        Ok(self.members.remove(user_id).is_some())
    }

    async fn list_ids(&self) -> DomainResult<Vec<String>> {
        let mut members: Vec<(String, DateTime<Utc>)> = self
            .members
            .iter()
            .map(|r| (r.key().clone(), *r.value()))
            .collect();
        members.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(members.into_iter().map(|(id, _)| id).collect())
    }
}

#[derive(Default)]
pub struct InMemoryTicketRepository {
    tickets: DashMap<String, Ticket>,
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn insert(&self, ticket: Ticket) -> DomainResult<()> {
        if self.tickets.contains_key(&ticket.id) {
            return Err(DomainError::Conflict(format!("Ticket {} already exists", ticket.id)));
        }
        self.tickets.insert(ticket.id.clone(), ticket);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Ticket>> {
        Ok(self.tickets.get(id).map(|r| r.value().clone()))
    }

    async fn list(&self, query: TicketQuery) -> DomainResult<Vec<Ticket>> {
        let mut tickets: Vec<Ticket> = self
            .tickets
            .iter()
            .filter(|r| {
                let t = r.value();
                query.created_by.as_deref().map_or(true, |c| t.created_by == c)
                    && query.status.map_or(true, |s| t.status == s)
            })
            .map(|r| r.value().clone())
            .collect();

        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(tickets)
    }

    async fn update(&self, ticket: &Ticket) -> DomainResult<()> {
        let mut stored = self
            .tickets
            .get_mut(&ticket.id)
            .ok_or_else(|| DomainError::ticket_not_found(&ticket.id))?;

        stored.title = ticket.title.clone();
        stored.description = ticket.description.clone();
        stored.priority = ticket.priority;
        stored.status = ticket.status;
        stored.updated_at = ticket.updated_at;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        Ok(self.tickets.remove(id).is_some())
    }
}

/// Repository provider that keeps everything in process memory
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    accounts: InMemoryAccountRepository,
    users: InMemoryUserRepository,
    admins: InMemoryAdminRepository,
    tickets: InMemoryTicketRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<dyn RepositoryProvider> {
        Arc::new(Self::new())
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn accounts(&self) -> &dyn AccountRepository {
        &self.accounts
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn admins(&self) -> &dyn AdminRepository {
        &self.admins
    }

    fn tickets(&self) -> &dyn TicketRepository {
        &self.tickets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewTicket, TicketStatus};

    fn ticket(title: &str, by: &str) -> Ticket {
        Ticket::submit(
            NewTicket {
                title: title.into(),
                description: "details".into(),
                priority: None,
            },
            by,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = InMemoryAccountRepository::default();
        let new = NewAccount {
            email: "a@corp.com".into(),
            password_hash: "h".into(),
        };
        repo.create(new.clone()).await.unwrap();
        assert!(matches!(repo.create(new).await, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn list_filters_by_creator_and_status() {
        let repo = InMemoryTicketRepository::default();
        let mut done = ticket("one", "a@corp.com");
        done.set_status(TicketStatus::Done);
        repo.insert(done).await.unwrap();
        repo.insert(ticket("two", "a@corp.com")).await.unwrap();
        repo.insert(ticket("three", "b@corp.com")).await.unwrap();

        let mine = repo
            .list(TicketQuery {
                created_by: Some("a@corp.com".into()),
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(mine.len(), 2);

        let open = repo
            .list(TicketQuery {
                created_by: None,
                status: Some(TicketStatus::Open),
            })
            .await
            .unwrap();
        assert_eq!(open.len(), 2);
        assert!(open.iter().all(|t| t.status == TicketStatus::Open));
    }

    #[tokio::test]
    async fn update_never_touches_creator() {
        let repo = InMemoryTicketRepository::default();
        let original = ticket("printer", "a@corp.com");
        repo.insert(original.clone()).await.unwrap();

        let mut changed = original.clone();
        changed.created_by = "mallory@corp.com".into();
        changed.title = "printer jam".into();
        repo.update(&changed).await.unwrap();

        let stored = repo.find_by_id(&original.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "printer jam");
        assert_eq!(stored.created_by, "a@corp.com");
    }

    #[tokio::test]
    async fn grant_is_idempotent_and_revoke_reports_membership() {
        let repo = InMemoryAdminRepository::default();
        repo.grant("u1").await.unwrap();
        repo.grant("u1").await.unwrap();
        assert_eq!(repo.list_ids().await.unwrap(), vec!["u1".to_string()]);
        assert!(repo.revoke("u1").await.unwrap());
        assert!(!repo.revoke("u1").await.unwrap());
        assert!(!repo.is_admin("u1").await.unwrap());
    }
}
