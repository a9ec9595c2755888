//! HTTP routes.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness probe
//!
//! # Orders
//! POST /api/orders/by-phone    - { "phone": "555-123-4567" }
//! POST /api/orders/by-number   - { "orderNumber": "#1024" }
//! POST /api/orders/by-email    - { "email": "ada@example.com" }
//! GET  /api/orders/{id}        - Numeric id or order GID
//!
//! # Support
//! POST /api/support/escalate   - Email the support inbox
//! ```

pub mod orders;
pub mod support;

use std::time::Duration;

use axum::{
    Router,
    http::{Method, header},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// All routes, without middleware.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(orders::router())
        .merge(support::router())
}

/// The complete application: routes, CORS, and request tracing.
pub fn build_app(state: AppState) -> Router {
    routes()
        .layer(build_cors())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri().path(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check Shopify.
async fn health() -> &'static str {
    "ok"
}
