//! Metrics API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Process-wide state is exactly this route set plus the listener config;
//! everything else is request-scoped.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::config;

/// Build the metrics API router.
///
/// Endpoint handlers use `State<ApiContext>` (provided via `with_state`).
/// The body limit caps multipart uploads before any field is read.
pub fn metrics_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/metrics", post(endpoints::metrics::compute))
        .route("/health", get(endpoints::health::check))
        .layer(DefaultBodyLimit::max(config::MAX_BODY_BYTES))
        .with_state(ctx)
}
