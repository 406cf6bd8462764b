//! Admin module — user roster and admin membership

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
