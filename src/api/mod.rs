//! HTTP API module for the liveness, GraphQL and metrics endpoints.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::{apply_layers, base_routes, create_router};
