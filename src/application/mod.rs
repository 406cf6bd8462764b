//! Application layer: use-case services over the domain repositories.

pub mod dashboard;
pub mod identity;
pub mod roster;
pub mod tickets;

pub use dashboard::{Dashboard, DashboardService};
pub use identity::{AuthResult, IdentityService};
pub use roster::{RosterEntry, RosterService};
pub use tickets::{TicketList, TicketService};
