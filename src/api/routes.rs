//! HTTP API route definitions.

use axum::{
    middleware,
    routing::{any, get},
    Router,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use super::handlers::{graphql_get, graphql_post, metrics_export, ping, AppState};
use crate::config::{METRICS_PATH, PING_PATH};
use crate::metrics::track_requests;

/// Built-in routes, without middleware.
pub fn base_routes(state: &AppState) -> Router<AppState> {
    let router = Router::new()
        // Liveness
        .route(PING_PATH, any(ping))
        // GraphQL; the body limit only guards the JSON-parsing route
        .route(
            &state.graphql_path,
            get(graphql_get)
                .post(graphql_post)
                .layer(RequestBodyLimitLayer::new(state.body_limit)),
        );

    if state.metrics.is_some() {
        router.route(METRICS_PATH, get(metrics_export))
    } else {
        router
    }
}

/// Wrap routes in the middleware chain and bind the state.
///
/// CORS is outermost so every response, errors included, carries the headers.
pub fn apply_layers(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .route_layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    apply_layers(base_routes(&state), state)
}
