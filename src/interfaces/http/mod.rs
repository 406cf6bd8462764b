//! HTTP REST API interfaces
//!
//! - `common`: response envelope, error mapping and the validated JSON extractor
//! - `middleware`: JWT authentication and the admin gate
//! - `modules`: request handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiContext, ApiDoc};
