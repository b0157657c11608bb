//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.settings.server.assets_dir);

    Router::new()
        // Page and UI events
        .route("/", get(handlers::index))
        .route("/session/:id", get(handlers::page))
        .route("/session/:id/event/:event", get(handlers::event))
        // API routes
        .route("/health", get(handlers::health))
        .route("/stats", get(handlers::stats))
        // Static routes
        .nest_service("/assets", assets)
        // Add middleware
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        // Add state
        .with_state(state)
}
