//! API request and response types

use serde::Deserialize;
use serde::Serialize;

/// Ingest request; `url` is accepted as an alias of `target_url`
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    #[serde(alias = "url")]
    pub target_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IngestResponse {
    pub status: String,
    pub documents: usize,
}

/// Chat request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TestResponse {
    pub status: String,
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error body: `{"detail": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_request_accepts_url_alias() {
        let req: IngestRequest = serde_json::from_str(r#"{"url": "https://a.org"}"#).unwrap();
        assert_eq!(req.target_url, "https://a.org");

        let req: IngestRequest =
            serde_json::from_str(r#"{"target_url": "https://b.org"}"#).unwrap();
        assert_eq!(req.target_url, "https://b.org");
    }

    #[test]
    fn test_ingest_request_requires_url() {
        assert!(serde_json::from_str::<IngestRequest>("{}").is_err());
    }
}
