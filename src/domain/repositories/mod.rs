//! Unified access to all per-aggregate repositories

use super::account::AccountRepository;
use super::ticket::TicketRepository;
use super::user::{AdminRepository, UserRepository};

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let ticket = repos.tickets().find_by_id("...").await?;
///     let is_admin = repos.admins().is_admin(&ticket.id).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn accounts(&self) -> &dyn AccountRepository;
    fn users(&self) -> &dyn UserRepository;
    fn admins(&self) -> &dyn AdminRepository;
    fn tickets(&self) -> &dyn TicketRepository;
}
