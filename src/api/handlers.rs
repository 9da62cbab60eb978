//! HTTP API handlers.

use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::{FromRequest, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::debug;

use crate::config::Config;
use crate::db::ChatStore;
use crate::graphql::{build_schema, ChatSchema};
use crate::metrics;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Executable GraphQL schema, holding the chat snapshot.
    pub schema: ChatSchema,
    /// Mount path of the GraphQL endpoint.
    pub graphql_path: Arc<str>,
    /// Whether browsers get GraphiQL on `GET <graphql_path>`.
    pub playground: bool,
    /// Maximum request body size in bytes.
    pub body_limit: usize,
    /// Prometheus handle; `/metrics` is only mounted when present.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state over the given snapshot.
    pub fn new(config: &Config, store: Arc<ChatStore>) -> Self {
        Self {
            schema: build_schema(store),
            graphql_path: Arc::from(config.graphql_path.as_str()),
            playground: config.graphql_playground,
            body_limit: config.json_body_limit,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Liveness check handler - always `pong`, whatever the request carries.
pub async fn ping() -> &'static str {
    "pong"
}

/// GraphQL over POST.
pub async fn graphql_post(State(state): State<AppState>, request: GraphQLRequest) -> GraphQLResponse {
    execute(&state.schema, request).await
}

/// GraphQL over GET, or GraphiQL when a browser asks for HTML.
pub async fn graphql_get(State(state): State<AppState>, request: Request) -> Response {
    if state.playground && accepts_html(request.headers()) {
        return Html(GraphiQLSource::build().endpoint(&state.graphql_path).finish()).into_response();
    }

    match <GraphQLRequest as FromRequest<AppState>>::from_request(request, &state).await {
        Ok(request) => execute(&state.schema, request).await.into_response(),
        Err(rejection) => rejection.into_response(),
    }
}

/// Prometheus text exposition.
pub async fn metrics_export(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn execute(schema: &ChatSchema, request: GraphQLRequest) -> GraphQLResponse {
    let _timer = metrics::timer_graphql_execution();
    let response = schema.execute(request.into_inner()).await;

    if response.is_err() {
        debug!(errors = response.errors.len(), "GraphQL request returned errors");
        metrics::inc_graphql_errors();
    }

    response.into()
}

fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn ping_says_pong() {
        assert_eq!(ping().await, "pong");
    }

    #[test]
    fn accepts_html_reads_accept_header() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_html(&headers));

        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        assert!(!accepts_html(&headers));

        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,*/*;q=0.8"),
        );
        assert!(accepts_html(&headers));
    }

    #[test]
    fn app_state_copies_config() {
        let config = Config {
            graphql_path: "/api/graphql".to_string(),
            graphql_playground: false,
            ..Config::default()
        };
        let state = AppState::new(&config, Arc::new(ChatStore::seeded()));
        assert_eq!(&*state.graphql_path, "/api/graphql");
        assert!(!state.playground);
        assert_eq!(state.body_limit, config.json_body_limit);
        assert!(state.metrics.is_none());
    }
}
