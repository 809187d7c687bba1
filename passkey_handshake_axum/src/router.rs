//! Combined router for the lifecycle proxy endpoints

use axum::Router;
use axum::http::Method;
use axum::routing::post;
use tower_http::LatencyUnit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::proxy::{ProxyState, close_transaction, create_transaction, validate_transaction};

/// Create the proxy router for all lifecycle endpoints
///
/// The endpoints will be available at:
/// - `POST /auth/create`
/// - `POST /auth/{transaction_id}/validate`
/// - `POST /auth/{transaction_id}/close`
///
/// CORS is origin-unrestricted and answers `OPTIONS` preflight with 200, the
/// contract the browser integration expects.
pub fn auth_proxy_router() -> Router {
    auth_proxy_router_no_trace().layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(true),
            )
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`auth_proxy_router`] but without HTTP tracing middleware.
///
/// Use this if you want to add your own tracing middleware or if you don't
/// need HTTP request tracing.
pub fn auth_proxy_router_no_trace() -> Router {
    auth_proxy_router_with_state(ProxyState::default())
}

/// Router over an explicitly injected [`ProxyState`], for callers that manage
/// their own upstream configuration (and for tests).
pub fn auth_proxy_router_with_state(state: ProxyState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/auth/create", post(create_transaction))
        .route("/auth/{transaction_id}/validate", post(validate_transaction))
        .route("/auth/{transaction_id}/close", post(close_transaction))
        .layer(cors)
        .with_state(state)
}
