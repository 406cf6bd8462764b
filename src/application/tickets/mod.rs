//! Ticket use-cases: submission, listing, owner edits and status changes.

pub mod service;

pub use service::{TicketList, TicketService};
