//! Domain layer: entities, invariants and repository interfaces.
//!
//! Nothing in here knows about HTTP or SeaORM.

pub mod account;
pub mod email;
pub mod repositories;
pub mod ticket;
pub mod user;

pub use account::{Account, AccountRepository, NewAccount};
pub use email::normalize_email;
pub use repositories::RepositoryProvider;
pub use ticket::{
    NewTicket, Ticket, TicketEdit, TicketPermissions, TicketPriority, TicketQuery,
    TicketRepository, TicketStats, TicketStatus,
};
pub use user::{Actor, AdminRepository, User, UserRepository, UserRole};

pub use crate::shared::errors::{DomainError, DomainResult};
