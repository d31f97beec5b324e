//! HTTP surface: router, shared state and middleware.

pub mod response;
pub mod routes;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Request},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info_span, warn};
use uuid::Uuid;

use crate::document::MAX_FILE_SIZE;
use crate::pipeline::AnalysisOrchestrator;

pub use response::ErrorBody;

/// Headroom for multipart boundaries, part headers and the `text` field.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<AnalysisOrchestrator>,
}

/// Build the router with the analysis, health and fallback routes.
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    info_span!(
                        "request",
                        id = %Uuid::new_v4(),
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(cors_origins));

    Router::new()
        .route("/api/analysis", post(routes::analyze))
        .route("/health", get(routes::health))
        .fallback(routes::not_found)
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + MULTIPART_OVERHEAD))
        .layer(middleware)
        .with_state(state)
}

/// CORS from the configured origins; `*` (or nothing usable) allows any.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        base.allow_origin(Any)
    } else {
        base.allow_origin(parsed)
    }
}
