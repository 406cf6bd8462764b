//! # IT Helpdesk
//!
//! Internal IT-support ticketing service. Employees submit tickets and
//! manage their own; administrators see every ticket, move it through
//! `open → in progress → done` and review the user roster.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: entities, invariants, the ticket access policy and repository traits
//! - **application**: use-case services (identity, tickets, roster, dashboard)
//! - **infrastructure**: SeaORM/SQLite persistence, bcrypt + JWT, in-memory repositories
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: runtime bootstrap shared by the CLI binary and tests

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig, InMemoryRepositoryProvider};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiContext};
