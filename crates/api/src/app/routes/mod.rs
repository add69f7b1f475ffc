use axum::{routing::get, Router};

pub mod items;
pub mod system;

/// Router for every endpoint of the service.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(items::router())
}
