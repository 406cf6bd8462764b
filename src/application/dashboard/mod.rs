//! Landing view: what the `/` screen shows for each role.

pub mod service;

pub use service::{Dashboard, DashboardService};
