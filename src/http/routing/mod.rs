use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::routes::health;

/// Wraps the resource routes with the health check, a per-request deadline
/// and request tracing. A request that outlives the deadline has its handler
/// dropped, which cancels any in-flight query.
pub fn app(router: Router, request_timeout: Duration) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .merge(router)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
