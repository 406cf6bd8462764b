//! Account aggregate: the identity-provider credential record.

pub mod model;
pub mod repository;

pub use model::{Account, NewAccount};
pub use repository::AccountRepository;
