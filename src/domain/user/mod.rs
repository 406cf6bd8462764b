//! User aggregate
//!
//! Contains the user record, the admin membership set, the role
//! derived from them, and the authenticated [`Actor`].

pub mod model;
pub mod repository;

pub use model::{Actor, User, UserRole};
pub use repository::{AdminRepository, UserRepository};
