//! Ticket repository interface

use async_trait::async_trait;

use super::model::{Ticket, TicketQuery};
use crate::domain::DomainResult;

#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn insert(&self, ticket: Ticket) -> DomainResult<()>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Ticket>>;

    /// Tickets matching the query, newest first
    async fn list(&self, query: TicketQuery) -> DomainResult<Vec<Ticket>>;

    /// Persist mutable fields (title, description, priority, status,
    /// updated_at). `created_by` and `created_at` are never written.
    async fn update(&self, ticket: &Ticket) -> DomainResult<()>;

    /// Returns whether a row was removed
    async fn delete(&self, id: &str) -> DomainResult<bool>;
}
