//! Database entities module

pub mod account;
pub mod admin;
pub mod ticket;
pub mod user;

pub use account::Entity as Account;
pub use admin::Entity as Admin;
pub use ticket::Entity as Ticket;
pub use user::Entity as User;
