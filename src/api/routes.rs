//! Router assembly.

use crate::api::handlers::{self, AppState};
use crate::core::{request_id_middleware, MetricsMiddleware};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the gateway router with all endpoints and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/llama", get(handlers::llama))
        .route("/api/deepseek", get(handlers::deepseek))
        .route("/api/gpt-oss", get(handlers::gpt_oss))
        .route("/api/search", get(handlers::search))
        .route("/api/image", get(handlers::image))
        .route("/api/domain", get(handlers::domain))
        .with_state(state);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics_handler))
        .merge(api_routes)
        .layer(axum::middleware::from_fn(MetricsMiddleware::track_metrics))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
