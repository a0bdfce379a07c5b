//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create the JSON API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health and diagnostics
        .route("/api/health", get(handlers::health))
        .route("/api/test", get(handlers::test_endpoint))
        .route("/api/stats", get(handlers::get_stats))
        // Ingestion
        .route("/ingest", post(handlers::ingest))
        .route("/api/ingest", post(handlers::ingest))
        // Chat
        .route("/api/chat", post(handlers::chat))
        .route("/chat", post(handlers::chat))
        .with_state(state)
}
