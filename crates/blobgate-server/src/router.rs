use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::context::GatewayContext;
use crate::handlers;

/// Build the axum router with all gateway endpoints.
///
/// Method routing answers wrong-method requests with 405 before any
/// handler runs.
pub fn build_router(ctx: Arc<GatewayContext>) -> Router {
    let max_upload = ctx.config().max_upload_bytes;
    Router::new()
        .route("/file/download", get(handlers::download))
        .route("/file/thumbnail", get(handlers::thumbnail))
        .route("/file/upload", post(handlers::upload))
        .route("/v1/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
