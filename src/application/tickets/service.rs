//! Ticket service
//!
//! Every operation takes the calling `Actor` and applies the access policy
//! from `domain::ticket::access` before touching storage.

use std::sync::Arc;

use tracing::info;

use crate::domain::ticket::access::{
    ensure_can_change_status, ensure_can_delete, ensure_can_edit, ensure_can_view,
};
use crate::domain::{
    Actor, DomainError, DomainResult, NewTicket, RepositoryProvider, Ticket, TicketEdit,
    TicketPriority, TicketQuery, TicketStats, TicketStatus,
};

/// Tickets visible to a caller plus counts over that visible set
#[derive(Debug, Clone)]
pub struct TicketList {
    pub tickets: Vec<Ticket>,
    pub stats: TicketStats,
}

pub struct TicketService {
    repos: Arc<dyn RepositoryProvider>,
}

impl TicketService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Priorities offered by the submission form
    pub fn priorities() -> &'static [TicketPriority] {
        &TicketPriority::ALL
    }

    pub async fn submit(&self, actor: &Actor, form: NewTicket) -> DomainResult<Ticket> {
        let ticket = Ticket::submit(form, &actor.email)?;
        self.repos.tickets().insert(ticket.clone()).await?;

        metrics::counter!("tickets_submitted_total", "priority" => ticket.priority.as_str())
            .increment(1);
        info!(
            ticket_id = %ticket.id,
            created_by = %ticket.created_by,
            priority = %ticket.priority,
            "Ticket submitted"
        );

        Ok(ticket)
    }

    /// Admins see every ticket, employees only their own. Stats always cover
    /// the whole visible set; `status` narrows the returned tickets.
    pub async fn list(&self, actor: &Actor, status: Option<TicketStatus>) -> DomainResult<TicketList> {
        let visible = self.visible(actor, None).await?;
        let stats = TicketStats::from_tickets(&visible);

        let tickets = match status {
            None => visible,
            Some(status) => self.visible(actor, Some(status)).await?,
        };

        Ok(TicketList { tickets, stats })
    }

    /// Tickets still needing attention across the whole organisation
    pub async fn active(&self) -> DomainResult<TicketList> {
        let tickets: Vec<Ticket> = self
            .repos
            .tickets()
            .list(TicketQuery::default())
            .await?
            .into_iter()
            .filter(|t| t.status.is_active())
            .collect();
        let stats = TicketStats::from_tickets(&tickets);
        Ok(TicketList { tickets, stats })
    }

    pub async fn get(&self, actor: &Actor, id: &str) -> DomainResult<Ticket> {
        let ticket = self.load(id).await?;
        ensure_can_view(actor, &ticket)?;
        Ok(ticket)
    }

    pub async fn edit(&self, actor: &Actor, id: &str, edit: TicketEdit) -> DomainResult<Ticket> {
        let mut ticket = self.load(id).await?;
        ensure_can_edit(actor, &ticket)?;

        ticket.apply_edit(edit)?;
        self.repos.tickets().update(&ticket).await?;

        info!(ticket_id = %ticket.id, "Ticket edited");
        Ok(ticket)
    }

    pub async fn delete(&self, actor: &Actor, id: &str) -> DomainResult<()> {
        let ticket = self.load(id).await?;
        ensure_can_delete(actor, &ticket)?;

        if !self.repos.tickets().delete(id).await? {
            return Err(DomainError::ticket_not_found(id));
        }

        info!(ticket_id = %id, "Ticket deleted");
        Ok(())
    }

    pub async fn change_status(
        &self,
        actor: &Actor,
        id: &str,
        status: TicketStatus,
    ) -> DomainResult<Ticket> {
        let mut ticket = self.load(id).await?;
        ensure_can_change_status(actor, &ticket)?;

        let previous = ticket.status;
        ticket.set_status(status);
        self.repos.tickets().update(&ticket).await?;

        metrics::counter!("ticket_status_changes_total", "status" => status.as_str()).increment(1);
        info!(
            ticket_id = %ticket.id,
            from = %previous,
            to = %status,
            changed_by = %actor.email,
            "Ticket status changed"
        );

        Ok(ticket)
    }

    pub async fn mark_done(&self, actor: &Actor, id: &str) -> DomainResult<Ticket> {
        self.change_status(actor, id, TicketStatus::Done).await
    }

    async fn load(&self, id: &str) -> DomainResult<Ticket> {
        self.repos
            .tickets()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::ticket_not_found(id))
    }

    async fn visible(&self, actor: &Actor, status: Option<TicketStatus>) -> DomainResult<Vec<Ticket>> {
        let created_by = if actor.is_admin() {
            None
        } else {
            Some(actor.email.clone())
        };
        self.repos
            .tickets()
            .list(TicketQuery { created_by, status })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn alice() -> Actor {
        Actor::new("u-alice", "alice@corp.com", UserRole::Employee)
    }

    fn bob() -> Actor {
        Actor::new("u-bob", "bob@corp.com", UserRole::Employee)
    }

    fn admin() -> Actor {
        Actor::new("u-root", "root@corp.com", UserRole::Admin)
    }

    fn form(title: &str) -> NewTicket {
        NewTicket {
            title: title.into(),
            description: "It does not work".into(),
            priority: Some(TicketPriority::Medium),
        }
    }

    fn service() -> TicketService {
        TicketService::new(InMemoryRepositoryProvider::shared())
    }

    #[tokio::test]
    async fn employees_list_only_their_own_tickets() {
        let svc = service();
        svc.submit(&alice(), form("VPN")).await.unwrap();
        svc.submit(&alice(), form("Mail")).await.unwrap();
        svc.submit(&bob(), form("Laptop")).await.unwrap();

        let mine = svc.list(&alice(), None).await.unwrap();
        assert_eq!(mine.tickets.len(), 2);
        assert!(mine.tickets.iter().all(|t| t.created_by == "alice@corp.com"));
        assert_eq!(mine.stats.total, 2);

        let all = svc.list(&admin(), None).await.unwrap();
        assert_eq!(all.tickets.len(), 3);
    }

    #[tokio::test]
    async fn status_filter_matches_stats() {
        let svc = service();
        let t = svc.submit(&alice(), form("VPN")).await.unwrap();
        svc.submit(&alice(), form("Mail")).await.unwrap();
        svc.change_status(&admin(), &t.id, TicketStatus::InProgress)
            .await
            .unwrap();

        let listing = svc.list(&alice(), None).await.unwrap();
        for status in TicketStatus::ALL {
            let filtered = svc.list(&alice(), Some(status)).await.unwrap();
            assert_eq!(filtered.tickets.len(), listing.stats.count(status));
            assert_eq!(filtered.stats, listing.stats);
        }
    }

    #[tokio::test]
    async fn other_employees_cannot_see_or_touch_a_ticket() {
        let svc = service();
        let t = svc.submit(&alice(), form("VPN")).await.unwrap();

        assert!(matches!(
            svc.get(&bob(), &t.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            svc.edit(
                &bob(),
                &t.id,
                TicketEdit {
                    title: Some("mine now".into()),
                    ..Default::default()
                }
            )
            .await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(svc.delete(&bob(), &t.id).await.is_err());
        assert!(svc.get(&alice(), &t.id).await.is_ok());
    }

    #[tokio::test]
    async fn owner_edits_but_cannot_change_status() {
        let svc = service();
        let t = svc.submit(&alice(), form("VPN")).await.unwrap();

        let edited = svc
            .edit(
                &alice(),
                &t.id,
                TicketEdit {
                    priority: Some(TicketPriority::High),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(edited.priority, TicketPriority::High);
        assert_eq!(edited.created_by, t.created_by);

        assert!(matches!(
            svc.change_status(&alice(), &t.id, TicketStatus::Done).await,
            Err(DomainError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn admin_changes_status_but_cannot_edit_or_delete() {
        let svc = service();
        let t = svc.submit(&alice(), form("VPN")).await.unwrap();

        let done = svc.mark_done(&admin(), &t.id).await.unwrap();
        assert_eq!(done.status, TicketStatus::Done);
        assert_eq!(done.created_by, "alice@corp.com");

        assert!(matches!(
            svc.edit(
                &admin(),
                &t.id,
                TicketEdit {
                    title: Some("x".into()),
                    ..Default::default()
                }
            )
            .await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            svc.delete(&admin(), &t.id).await,
            Err(DomainError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn owner_deletes_ticket() {
        let svc = service();
        let t = svc.submit(&alice(), form("VPN")).await.unwrap();
        svc.delete(&alice(), &t.id).await.unwrap();
        assert!(matches!(
            svc.get(&alice(), &t.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn active_excludes_done() {
        let svc = service();
        let t = svc.submit(&alice(), form("VPN")).await.unwrap();
        svc.submit(&bob(), form("Mail")).await.unwrap();
        svc.mark_done(&admin(), &t.id).await.unwrap();

        let active = svc.active().await.unwrap();
        assert_eq!(active.tickets.len(), 1);
        assert_eq!(active.stats.done, 0);
        assert_eq!(active.stats.total, active.stats.open + active.stats.in_progress);
    }
}
