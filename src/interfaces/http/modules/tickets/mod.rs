//! Tickets module — submission form, ticket list, owner edits, admin triage

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
