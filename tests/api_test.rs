mod common;

use axum::body::Body;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use kbrag::api::build_router;
use kbrag::api::AppState;
use kbrag::config::ServerConfig;
use serde_json::json;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

async fn test_app() -> (TempDir, TempDir, Router) {
    let (data_dir, kb) = common::knowledge_base(false).unwrap();

    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("index.html"), "<html>chat</html>").unwrap();
    std::fs::create_dir(static_dir.path().join("assets")).unwrap();
    std::fs::write(static_dir.path().join("assets").join("app.js"), "console.log(1);").unwrap();

    let server = ServerConfig {
        static_dir: static_dir.path().to_path_buf(),
        ..ServerConfig::default()
    };
    let app = build_router(AppState::new(kb), &server);
    (data_dir, static_dir, app)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_test_endpoint() {
    let (_data, _static, app) = test_app().await;
    let (status, body) = get_json(&app, "/api/test").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "API is working", "message": "This is a test endpoint"})
    );
}

#[tokio::test]
async fn test_health() {
    let (_data, _static, app) = test_app().await;
    let (status, body) = get_json(&app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_chat_on_empty_knowledge_base() {
    let (_data, _static, app) = test_app().await;
    let (status, body) = post_json(&app, "/api/chat", json!({"query": "what is gifting"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"detail": "Knowledge base is empty. Ingest a URL first."})
    );
}

#[tokio::test]
async fn test_ingest_rejects_non_http_url() {
    let (_data, _static, app) = test_app().await;
    let (status, body) =
        post_json(&app, "/ingest", json!({"target_url": "ftp://example.com"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "URL must start with http:// or https://");
}

#[tokio::test]
async fn test_ingest_unreachable_without_fallback() {
    let (_data, _static, app) = test_app().await;
    let (status, body) =
        post_json(&app, "/ingest", json!({"target_url": "http://127.0.0.1:9/"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Failed to fetch URL:"));
}

#[tokio::test]
async fn test_malformed_body_is_client_error() {
    let (_data, _static, app) = test_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from("{\"question\": 1}"))
        .unwrap();
    let (status, _) = send(&app, request).await;

    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_ingest_then_chat() {
    let pages = common::spawn_page_server().await;
    let (_data, _static, app) = test_app().await;

    let url = format!("http://{pages}/desert");
    let (status, body) = post_json(&app, "/api/ingest", json!({"url": format!("  {url} ")})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ingested", "documents": 1}));

    let (status, body) = post_json(
        &app,
        "/chat",
        json!({"query": "where is the temporary city built"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let answer = body["answer"].as_str().unwrap();
    assert!(answer.contains("temporary city built in the black rock desert every summer"));
    assert!(answer.contains(&format!("source: <a href=\"{url}\" target=\"_blank\">")));
    assert!(!answer.contains("tracking"));

    let (_, stats) = get_json(&app, "/api/stats").await;
    assert_eq!(stats["documents"], 1);
    assert_eq!(stats["embedded_documents"], 1);
}

#[tokio::test]
async fn test_serves_frontend_and_assets() {
    let (_data, _static, app) = test_app().await;

    let (status, body) = send(&app, Request::builder().uri("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<html>chat</html>");

    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/assets/app.js")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"console.log(1);");
}
