//! Embeddings generation module
//!
//! This module provides functionality for generating text embeddings using various providers:
//! - Hashed (offline feature hashing, the default)
//! - Ollama (local models)
//! - OpenAI (text-embedding-3-small, etc.)
//!
//! # Examples
//!
//! ```rust,no_run
//! use kbrag::embeddings::EmbeddingService;
//! use kbrag::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = EmbeddingService::new(&config)?;
//!
//!     let embedding = service.embed_query("What is radical inclusion?").await?;
//!     println!("Generated embedding with {} dimensions", embedding.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod generator;
pub mod hashed;
#[cfg(test)]
mod mock;

pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;
pub use generator::EmbeddingService;
pub use hashed::HashedEmbedder;
pub use hashed::HASHED_MODEL;

/// Maximum batch size for embedding generation
pub const MAX_BATCH_SIZE: usize = 100;

/// Configuration for embedding generation
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub dimension: usize,
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl EmbeddingConfig {
    pub fn from_app_config(config: &crate::config::AppConfig) -> Self {
        let embeddings = &config.embeddings;
        Self {
            provider: embeddings.provider,
            model: config.embedding_model().to_string(),
            dimension: embeddings.dimension,
            endpoint: embeddings.endpoint.clone(),
            api_key: embeddings.api_key.clone(),
        }
    }
}
