//! API request handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::api::types::ChatRequest;
use crate::api::types::ChatResponse;
use crate::api::types::ErrorResponse;
use crate::api::types::HealthResponse;
use crate::api::types::IngestRequest;
use crate::api::types::IngestResponse;
use crate::api::types::TestResponse;
use crate::errors::KbRagError;
use crate::models::StoreStats;
use crate::rag::KnowledgeBase;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub knowledge_base: Arc<KnowledgeBase>,
}

impl AppState {
    pub fn new(knowledge_base: KnowledgeBase) -> Self {
        Self {
            knowledge_base: Arc::new(knowledge_base),
        }
    }
}

/// Error returned by handlers, rendered as `{"detail": ...}`
#[derive(Debug)]
pub struct ApiError(KbRagError);

impl From<KbRagError> for ApiError {
    fn from(err: KbRagError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            warn!("Rejected request: {}", self.0);
            StatusCode::BAD_REQUEST
        } else {
            error!("Request failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (
            status,
            Json(ErrorResponse {
                detail: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// Health check handler
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn test_endpoint() -> Json<TestResponse> {
    info!("GET /api/test");
    Json(TestResponse {
        status: "API is working".to_string(),
        message: "This is a test endpoint".to_string(),
    })
}

/// Get store statistics
pub async fn get_stats(State(state): State<AppState>) -> Json<StoreStats> {
    info!("GET /api/stats");
    Json(state.knowledge_base.stats().await)
}

/// Fetch a URL and add it to the knowledge base
pub async fn ingest(
    State(state): State<AppState>,
    Json(req): Json<IngestRequest>,
) -> ApiResult<IngestResponse> {
    info!("POST /ingest: {}", req.target_url.trim());

    let documents = state.knowledge_base.ingest(&req.target_url).await?;
    Ok(Json(IngestResponse {
        status: "ingested".to_string(),
        documents,
    }))
}

/// Answer a question from the knowledge base
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<ChatResponse> {
    info!("POST /api/chat");

    let answer = state.knowledge_base.answer(&req.query).await?;
    Ok(Json(ChatResponse { answer }))
}
