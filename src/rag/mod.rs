//! Retrieval and answer synthesis
//!
//! This module answers free-text questions over the ingested documents:
//! - Special-case answers for the ten principles
//! - Semantic retrieval (dense embeddings) or legacy term-frequency retrieval
//! - Rule-based response synthesis with source attribution
//!
//! # Examples
//!
//! ```rust,no_run
//! use kbrag::rag::KnowledgeBase;
//! use kbrag::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let kb = KnowledgeBase::new(&config).await?;
//!
//!     kb.ingest("https://burningman.org/about/10-principles/").await?;
//!     println!("{}", kb.answer("what is radical self-reliance?").await?);
//!
//!     Ok(())
//! }
//! ```

pub mod pipeline;
pub mod principles;
pub mod retriever;
pub mod synthesizer;

use serde::Deserialize;
use serde::Serialize;

pub use pipeline::KnowledgeBase;
pub use retriever::Retriever;
pub use synthesizer::synthesize_response;

use crate::models::Document;

/// A ranked document
#[derive(Debug, Clone, Copy)]
pub struct SearchResult<'a> {
    pub document: &'a Document,
    pub similarity: f32,
    /// Position of the document in the store
    pub index: usize,
}

/// How documents are scored against a query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalMethod {
    /// Cosine similarity of dense embeddings
    #[default]
    Semantic,
    /// Cosine similarity of raw term counts
    TermFrequency,
}

impl std::fmt::Display for RetrievalMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Semantic => write!(f, "semantic"),
            Self::TermFrequency => write!(f, "term_frequency"),
        }
    }
}
