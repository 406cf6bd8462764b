//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{
    AccountRepository, AdminRepository, RepositoryProvider, TicketRepository, UserRepository,
};

use super::account_repository::SeaOrmAccountRepository;
use super::admin_repository::SeaOrmAdminRepository;
use super::ticket_repository::SeaOrmTicketRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let mine = repos.tickets().list(TicketQuery { created_by: Some(email), ..Default::default() }).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    accounts: SeaOrmAccountRepository,
    users: SeaOrmUserRepository,
    admins: SeaOrmAdminRepository,
    tickets: SeaOrmTicketRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            accounts: SeaOrmAccountRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db.clone()),
            admins: SeaOrmAdminRepository::new(db.clone()),
            tickets: SeaOrmTicketRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
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
