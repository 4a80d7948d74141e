use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};
use super::static_files::serve_static;

/// Create the main router with all routes
pub fn create_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    let api_routes = Router::new()
        // Cost routes
        .route("/costs/today", get(handlers::get_today_costs))
        .route("/costs/history", get(handlers::get_cost_history))
        // Backlog routes
        .route("/backlog", get(handlers::get_backlog))
        .route("/backlog/sections", get(handlers::get_backlog_sections))
        // Health check
        .route("/health", get(handlers::health_check));

    // The dashboard may be served from a dev server on another port
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(serve_static(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
