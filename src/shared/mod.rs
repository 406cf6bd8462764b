pub mod errors;
pub mod shutdown;

pub use errors::{DomainError, DomainResult};
pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
