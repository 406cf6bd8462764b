use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{
    DomainError, DomainResult, Ticket, TicketPriority, TicketQuery, TicketRepository, TicketStatus,
};
use crate::infrastructure::database::entities::ticket;

pub struct SeaOrmTicketRepository {
    db: DatabaseConnection,
}

impl SeaOrmTicketRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn priority_to_domain(p: ticket::TicketPriority) -> TicketPriority {
    match p {
        ticket::TicketPriority::Low => TicketPriority::Low,
        ticket::TicketPriority::Medium => TicketPriority::Medium,
        ticket::TicketPriority::High => TicketPriority::High,
    }
}

fn priority_to_entity(p: TicketPriority) -> ticket::TicketPriority {
    match p {
        TicketPriority::Low => ticket::TicketPriority::Low,
        TicketPriority::Medium => ticket::TicketPriority::Medium,
        TicketPriority::High => ticket::TicketPriority::High,
    }
}

fn status_to_domain(s: ticket::TicketStatus) -> TicketStatus {
    match s {
        ticket::TicketStatus::Open => TicketStatus::Open,
        ticket::TicketStatus::InProgress => TicketStatus::InProgress,
        ticket::TicketStatus::Done => TicketStatus::Done,
    }
}

fn status_to_entity(s: TicketStatus) -> ticket::TicketStatus {
    match s {
        TicketStatus::Open => ticket::TicketStatus::Open,
        TicketStatus::InProgress => ticket::TicketStatus::InProgress,
        TicketStatus::Done => ticket::TicketStatus::Done,
    }
}

fn ticket_model_to_domain(model: ticket::Model) -> Ticket {
    Ticket {
        id: model.id,
        title: model.title,
        description: model.description,
        priority: priority_to_domain(model.priority),
        status: status_to_domain(model.status),
        created_by: model.created_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl TicketRepository for SeaOrmTicketRepository {
    async fn insert(&self, t: Ticket) -> DomainResult<()> {
        let active = ticket::ActiveModel {
            id: Set(t.id),
            title: Set(t.title),
            description: Set(t.description),
            priority: Set(priority_to_entity(t.priority)),
            status: Set(status_to_entity(t.status)),
            created_by: Set(t.created_by),
            created_at: Set(t.created_at),
            updated_at: Set(t.updated_at),
        };
        active.insert(&self.db).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Ticket>> {
        let model = ticket::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(ticket_model_to_domain))
    }

    async fn list(&self, query: TicketQuery) -> DomainResult<Vec<Ticket>> {
        let mut select = ticket::Entity::find();

        if let Some(ref created_by) = query.created_by {
            select = select.filter(ticket::Column::CreatedBy.eq(created_by.as_str()));
        }
        if let Some(status) = query.status {
            select = select.filter(ticket::Column::Status.eq(status_to_entity(status)));
        }

        let models = select
            .order_by_desc(ticket::Column::CreatedAt)
            .order_by_desc(ticket::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(ticket_model_to_domain).collect())
    }

    async fn update(&self, t: &Ticket) -> DomainResult<()> {
        let existing = ticket::Entity::find_by_id(t.id.as_str())
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::ticket_not_found(&t.id))?;

        // created_by and created_at are never rewritten
        let mut active: ticket::ActiveModel = existing.into();
        active.title = Set(t.title.clone());
        active.description = Set(t.description.clone());
        active.priority = Set(priority_to_entity(t.priority));
        active.status = Set(status_to_entity(t.status));
        active.updated_at = Set(t.updated_at);
        active.update(&self.db).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        let result = ticket::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
