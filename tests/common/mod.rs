//! Shared helpers for integration tests

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::response::Html;
use axum::routing::get;
use axum::Router;
use kbrag::config::FetchConfig;
use kbrag::config::RetrievalConfig;
use kbrag::embeddings::EmbeddingService;
use kbrag::ingest::PageFetcher;
use kbrag::rag::KnowledgeBase;
use kbrag::store::DocumentStore;
use kbrag::Result;
use tempfile::TempDir;

pub const DESERT_PAGE: &str = r#"<html>
<head><style>body { color: red; }</style><script>var tracking = 1;</script></head>
<body>
  <nav>Menu</nav>
  <p>Burning Man is a temporary city built in the Black Rock Desert every summer.</p>
  <p>Participants practice radical self-reliance and leave no trace.</p>
</body>
</html>"#;

pub const GIFTING_PAGE: &str = r"<html><body>
  <h1>Gifting</h1>
  <p>Gifting is unconditional and gifts are given without expecting anything in return.</p>
</body></html>";

/// Serve a few fixed pages on an ephemeral local port
pub async fn spawn_page_server() -> SocketAddr {
    let app = Router::new()
        .route("/desert", get(|| async { Html(DESERT_PAGE) }))
        .route("/gifting", get(|| async { Html(GIFTING_PAGE) }))
        .route("/empty", get(|| async { Html("<html><body>   </body></html>") }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind page server");
    let addr = listener.local_addr().expect("page server address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("page server");
    });
    addr
}

/// Knowledge base backed by a temp directory, using offline embeddings
pub fn knowledge_base(offline_fallback: bool) -> Result<(TempDir, KnowledgeBase)> {
    let dir = tempfile::tempdir()?;
    let store = DocumentStore::empty(dir.path().join("sources.json"));
    let embedding_service = Arc::new(EmbeddingService::hashed(384)?);
    let fetcher = PageFetcher::new(&FetchConfig {
        timeout_secs: 5,
        offline_fallback,
        ..FetchConfig::default()
    })?;

    let kb = KnowledgeBase::from_parts(
        store,
        embedding_service,
        fetcher,
        RetrievalConfig::default(),
    );
    Ok((dir, kb))
}
