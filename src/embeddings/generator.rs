//! Embedding generation service for queries and documents

use std::sync::Arc;

use tracing::debug;

use super::client::EmbeddingClient;
use super::EmbeddingConfig;
use super::EmbeddingProvider;
use super::MAX_BATCH_SIZE;
use crate::errors::KbRagError;
use crate::errors::Result;
use crate::text::clean_text;

/// Service for generating query and document embeddings
pub struct EmbeddingService {
    client: Arc<EmbeddingClient>,
    config: EmbeddingConfig,
}

impl EmbeddingService {
    /// Create a new embedding service
    pub fn new(config: &crate::config::AppConfig) -> Result<Self> {
        Self::from_config(EmbeddingConfig::from_app_config(config))
    }

    /// Create from custom config
    pub fn from_config(config: EmbeddingConfig) -> Result<Self> {
        let client = EmbeddingClient::new(
            config.provider,
            config.model.clone(),
            config.endpoint.clone(),
            config.api_key.clone(),
            config.dimension,
        )?;

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    /// Offline service using hashed embeddings of the given dimension
    pub fn hashed(dimension: usize) -> Result<Self> {
        Self::from_config(EmbeddingConfig {
            provider: EmbeddingProvider::Hashed,
            model: super::HASHED_MODEL.to_string(),
            dimension,
            endpoint: String::new(),
            api_key: None,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn dimension(&self) -> usize {
        self.config.dimension
    }

    pub fn provider(&self) -> EmbeddingProvider {
        self.config.provider
    }

    /// Embed a user query as-is
    pub async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(KbRagError::EmbeddingError("Empty query provided".to_string()));
        }
        self.client.generate(query).await
    }

    /// Embed document text after boilerplate cleaning
    pub async fn embed_document(&self, text: &str) -> Result<Vec<f32>> {
        let prepared = prepare_document(text)?;
        debug!("Embedding document: {} -> {} chars", text.len(), prepared.len());
        self.client.generate(&prepared).await
    }

    /// Embed many documents, preserving order
    pub async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let prepared = texts
            .iter()
            .map(|t| prepare_document(t))
            .collect::<Result<Vec<_>>>()?;

        let mut embeddings = Vec::with_capacity(prepared.len());
        for chunk in prepared.chunks(MAX_BATCH_SIZE) {
            let batch = self
                .client
                .generate_batch(chunk.iter().map(String::as_str).collect())
                .await?;
            embeddings.extend(batch);
        }
        Ok(embeddings)
    }
}

/// Cleaned text, or the raw text when cleaning strips everything
fn prepare_document(text: &str) -> Result<String> {
    let cleaned = clean_text(text);
    if !cleaned.is_empty() {
        return Ok(cleaned);
    }
    let raw = text.trim();
    if raw.is_empty() {
        return Err(KbRagError::EmbeddingError("Empty text provided".to_string()));
    }
    Ok(raw.to_string())
}
