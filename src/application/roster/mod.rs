//! Admin roster: user records with their resolved roles.

pub mod service;

pub use service::{RosterEntry, RosterService};
