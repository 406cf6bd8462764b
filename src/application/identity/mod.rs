//! Identity module — accounts, sessions and role resolution
//!
//! Contains the `IdentityService` which orchestrates registration, login,
//! role resolution, password changes and bootstrap admin seeding.

pub mod service;

pub use service::{AuthResult, IdentityService, PASSWORD_MAX_LEN, PASSWORD_MIN_LEN};
