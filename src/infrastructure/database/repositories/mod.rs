//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod account_repository;
pub mod admin_repository;
pub mod repository_provider;
pub mod ticket_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
