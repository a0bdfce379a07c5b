//! HTTP server implementation

use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing::warn;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::config::ServerConfig;
use crate::rag::KnowledgeBase;
use crate::Result;

/// Assemble the API routes, static frontend and middleware layers
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let index = server.static_dir.join("index.html");
    if !index.exists() {
        warn!("No frontend found at {}", index.display());
    }

    let mut app = routes::api_routes(state)
        .route_service("/", ServeFile::new(index))
        .nest_service("/assets", ServeDir::new(server.static_dir.join("assets")))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        );

    if server.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Start the API server
pub async fn serve_api(config: &AppConfig) -> Result<()> {
    info!("🚀 Starting kbrag API server...");

    let knowledge_base = KnowledgeBase::new(config).await?;
    info!(
        "📚 Loaded {} documents from {}",
        knowledge_base.len().await,
        config.sources_path().display()
    );

    let app = build_router(AppState::new(knowledge_base), &config.server);
    if config.server.enable_cors {
        info!("✅ CORS enabled");
    }

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /                 - Chat frontend");
    info!("  GET  /api/health       - Health check");
    info!("  GET  /api/test         - Test endpoint");
    info!("  GET  /api/stats        - Statistics");
    info!("  POST /ingest           - Ingest a URL");
    info!("  POST /api/chat         - Ask a question");

    axum::serve(listener, app).await?;

    Ok(())
}
