use std::sync::Arc;

use crate::application::roster::{RosterEntry, RosterService};
use crate::application::tickets::{TicketList, TicketService};
use crate::domain::{Actor, DomainResult};

#[derive(Debug, Clone)]
pub enum Dashboard {
    /// The caller's own tickets with stats over them
    Employee { tickets: TicketList },
    /// Active tickets, stats over them and the user roster
    Admin {
        tickets: TicketList,
        roster: Vec<RosterEntry>,
    },
}

pub struct DashboardService {
    tickets: Arc<TicketService>,
    roster: Arc<RosterService>,
}

impl DashboardService {
    pub fn new(tickets: Arc<TicketService>, roster: Arc<RosterService>) -> Self {
        Self { tickets, roster }
    }

    pub async fn for_actor(&self, actor: &Actor) -> DomainResult<Dashboard> {
        if actor.is_admin() {
            let tickets = self.tickets.active().await?;
            let roster = self.roster.list_roster(actor).await?;
            Ok(Dashboard::Admin { tickets, roster })
        } else {
            let tickets = self.tickets.list(actor, None).await?;
            Ok(Dashboard::Employee { tickets })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewTicket, RepositoryProvider, User, UserRole};
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn form() -> NewTicket {
        NewTicket {
            title: "Printer".into(),
            description: "Out of toner".into(),
            priority: None,
        }
    }

    #[tokio::test]
    async fn view_depends_on_role() {
        let repos: Arc<dyn RepositoryProvider> = InMemoryRepositoryProvider::shared();
        repos
            .users()
            .create(User::employee("u1", "alice@corp.com"))
            .await
            .unwrap();

        let tickets = Arc::new(TicketService::new(repos.clone()));
        let dashboard = DashboardService::new(tickets.clone(), Arc::new(RosterService::new(repos)));

        let alice = Actor::new("u1", "alice@corp.com", UserRole::Employee);
        let admin = Actor::new("root", "root@corp.com", UserRole::Admin);

        let done = tickets.submit(&alice, form()).await.unwrap();
        tickets.submit(&alice, form()).await.unwrap();
        tickets.mark_done(&admin, &done.id).await.unwrap();

        match dashboard.for_actor(&alice).await.unwrap() {
            Dashboard::Employee { tickets } => {
                assert_eq!(tickets.tickets.len(), 2);
                assert_eq!(tickets.stats.done, 1);
            }
            other => panic!("expected employee view, got {:?}", other),
        }

        match dashboard.for_actor(&admin).await.unwrap() {
            Dashboard::Admin { tickets, roster } => {
                assert_eq!(tickets.tickets.len(), 1);
                assert_eq!(tickets.stats.done, 0);
                assert_eq!(roster.len(), 1);
            }
            other => panic!("expected admin view, got {:?}", other),
        }
    }
}
