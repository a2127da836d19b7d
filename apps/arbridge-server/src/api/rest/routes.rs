//! Route table for the integration gateway API.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use arbridge_core::ModuleService;

use super::handlers;

/// Builds the full application router, layered with request tracing and a
/// permissive CORS policy.
pub fn router(service: Arc<ModuleService>) -> Router {
    Router::new()
        .route("/api/v1/integration/modules", get(handlers::list_modules))
        .route(
            "/api/v1/integration/{module_type}",
            post(handlers::create_entry),
        )
        // Static segments win over the `{entry_id}` capture below, so
        // `search` and `batch` never resolve as entry ids.
        .route(
            "/api/v1/integration/{module_type}/search",
            get(handlers::search_entries),
        )
        .route(
            "/api/v1/integration/{module_type}/batch",
            post(handlers::batch_create),
        )
        .route(
            "/api/v1/integration/{module_type}/{entry_id}",
            get(handlers::get_entry).put(handlers::update_entry),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}
