//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: the item store handed to every handler
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: query DTOs and response bodies
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router around an explicitly constructed set of services.
///
/// Each call gets its own store through `services`, so tests can run isolated
/// instances side by side.
pub fn build_app(services: services::AppServices) -> Router {
    let services = Arc::new(services);

    routes::router()
        .layer(Extension(services))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::cors_middleware)))
}
