//! Ticket aggregate
//!
//! Contains the Ticket entity, the per-role access policy, client-facing
//! statistics and the repository interface.

pub mod access;
pub mod model;
pub mod repository;
pub mod stats;

pub use access::TicketPermissions;
pub use model::{NewTicket, Ticket, TicketEdit, TicketPriority, TicketQuery, TicketStatus};
pub use repository::TicketRepository;
pub use stats::TicketStats;
