//! Retrieval module for semantic and term-frequency search

use std::sync::Arc;

use tracing::debug;

use crate::embeddings::EmbeddingService;
use crate::errors::Result;
use crate::models::Document;
use crate::rag::RetrievalMethod;
use crate::rag::SearchResult;
use crate::text::TermVector;

/// Cosine similarity of two dense vectors
///
/// Returns 0.0 when the dimensions differ or either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

/// Sort by similarity, best first; equal scores keep store order
fn rank(mut results: Vec<SearchResult<'_>>, top_k: usize) -> Vec<SearchResult<'_>> {
    results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    results.truncate(top_k);
    results
}

/// A query turned into the representation a retrieval method scores with
#[derive(Debug, Clone)]
pub enum PreparedQuery {
    Embedding(Vec<f32>),
    Terms(TermVector),
}

/// Linear-scan retriever over the in-memory documents
///
/// Retrieval is split in two: [`Retriever::prepare`] may call out to the
/// embedding provider and needs no documents, [`Retriever::rank`] is a pure
/// scan over a borrowed slice.
pub struct Retriever {
    embedding_service: Arc<EmbeddingService>,
}

impl Retriever {
    pub fn new(embedding_service: Arc<EmbeddingService>) -> Self {
        Self { embedding_service }
    }

    /// Build the query representation for `method`
    pub async fn prepare(&self, method: RetrievalMethod, query: &str) -> Result<PreparedQuery> {
        match method {
            RetrievalMethod::Semantic => Ok(PreparedQuery::Embedding(
                self.embedding_service.embed_query(query).await?,
            )),
            RetrievalMethod::TermFrequency => Ok(PreparedQuery::Terms(TermVector::from_text(query))),
        }
    }

    /// Top `top_k` documents for a prepared query
    pub fn rank<'a>(
        prepared: &PreparedQuery,
        documents: &'a [Document],
        top_k: usize,
    ) -> Vec<SearchResult<'a>> {
        match prepared {
            PreparedQuery::Embedding(embedding) => Self::semantic_rank(embedding, documents, top_k),
            PreparedQuery::Terms(terms) => Self::term_frequency_rank(terms, documents, top_k),
        }
    }

    /// Rank by cosine similarity of embeddings
    ///
    /// Documents without an embedding are not ranked.
    fn semantic_rank<'a>(
        query_embedding: &[f32],
        documents: &'a [Document],
        top_k: usize,
    ) -> Vec<SearchResult<'a>> {
        let results: Vec<SearchResult<'a>> = documents
            .iter()
            .enumerate()
            .filter_map(|(index, document)| {
                document.embedding.as_ref().map(|embedding| SearchResult {
                    document,
                    similarity: cosine_similarity(query_embedding, embedding),
                    index,
                })
            })
            .collect();

        let ranked = rank(results, top_k);
        debug!(
            "Semantic search over {} documents, top similarities: {:?}",
            documents.len(),
            ranked.iter().map(|r| r.similarity).collect::<Vec<_>>()
        );
        ranked
    }

    /// Legacy ranking on raw term counts
    fn term_frequency_rank<'a>(
        query_vector: &TermVector,
        documents: &'a [Document],
        top_k: usize,
    ) -> Vec<SearchResult<'a>> {
        let results = documents
            .iter()
            .enumerate()
            .map(|(index, document)| SearchResult {
                document,
                similarity: query_vector.cosine(&document.term_vector),
                index,
            })
            .collect();

        rank(results, top_k)
    }
}
