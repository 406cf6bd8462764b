//! Dashboard module — the landing view for each role

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
