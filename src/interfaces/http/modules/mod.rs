pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod metrics;
pub mod request_id;
pub mod tickets;
