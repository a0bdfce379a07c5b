//! Complete question answering pipeline: special cases -> retrieve -> synthesize

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::sync::RwLockReadGuard;
use tracing::debug;
use tracing::info;

use crate::config::AppConfig;
use crate::config::RetrievalConfig;
use crate::embeddings::EmbeddingService;
use crate::errors::KbRagError;
use crate::errors::Result;
use crate::ingest::validate_url;
use crate::ingest::PageFetcher;
use crate::models::Document;
use crate::models::StoreStats;
use crate::rag::principles;
use crate::rag::synthesize_response;
use crate::rag::Retriever;
use crate::store::DocumentStore;

pub const EMPTY_KNOWLEDGE_BASE_MESSAGE: &str = "Knowledge base is empty. Ingest a URL first.";

pub const NO_MATCH_MESSAGE: &str = "I couldn't find information specifically about that topic in my Burning Man knowledge base. Could you try rephrasing your question or ask about something else related to Burning Man?";

/// The knowledge base: document store plus everything needed to fill and query it
pub struct KnowledgeBase {
    store: RwLock<DocumentStore>,
    embedding_service: Arc<EmbeddingService>,
    fetcher: PageFetcher,
    retriever: Retriever,
    retrieval: RetrievalConfig,
}

impl KnowledgeBase {
    /// Build from configuration, loading the document store from disk
    ///
    /// # Errors
    /// - Embedding service configuration errors
    /// - Unreadable or corrupt sources file
    /// - Embedding failures while backfilling stored documents
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let embedding_service = Arc::new(EmbeddingService::new(config)?);
        let store = DocumentStore::open(config.sources_path(), &embedding_service).await?;
        let fetcher = PageFetcher::new(&config.fetch)?;

        Ok(Self::from_parts(
            store,
            embedding_service,
            fetcher,
            config.retrieval.clone(),
        ))
    }

    /// Create from existing services
    #[must_use]
    pub fn from_parts(
        store: DocumentStore,
        embedding_service: Arc<EmbeddingService>,
        fetcher: PageFetcher,
        retrieval: RetrievalConfig,
    ) -> Self {
        let retriever = Retriever::new(embedding_service.clone());
        Self {
            store: RwLock::new(store),
            embedding_service,
            fetcher,
            retriever,
            retrieval,
        }
    }

    /// Fetch a page, embed it and add it to the store
    ///
    /// Returns the number of documents after ingestion.
    pub async fn ingest(&self, url: &str) -> Result<usize> {
        let url = validate_url(url)?;
        info!("Ingesting {}", url);

        let text = self.fetcher.fetch_text(&url).await?;
        if text.trim().is_empty() {
            return Err(KbRagError::InvalidInput("No text found at URL".to_string()));
        }

        let embedding = self.embedding_service.embed_document(&text).await?;
        let document = Document::new(url.clone(), text)
            .with_embedding(embedding, self.embedding_service.model());

        let count = self.store.write().await.add(document).await?;
        info!("Ingested {} ({} documents total)", url, count);
        Ok(count)
    }

    /// Answer a free-text question from the stored documents
    ///
    /// The store lock is released while the query is embedded, so a slow
    /// embedding provider never blocks ingestion.
    pub async fn answer(&self, query: &str) -> Result<String> {
        info!("Received chat request: {}", query);
        {
            let store = self.store.read().await;
            info!("Documents available: {}", store.len());

            if store.is_empty() {
                return Err(KbRagError::EmptyKnowledgeBase(
                    EMPTY_KNOWLEDGE_BASE_MESSAGE.to_string(),
                ));
            }
            if query.trim().is_empty() {
                return Err(KbRagError::InvalidInput("Query must not be empty".to_string()));
            }

            let documents = store.documents();
            let lowered = query.to_lowercase();

            if let Some(answer) = principles::principle_list_answer(&lowered, documents) {
                debug!("Answered with the principle list");
                return Ok(answer);
            }
            if let Some(answer) = principles::first_principle_answer(&lowered, documents) {
                debug!("Answered with the first principle");
                return Ok(answer);
            }
        }

        let prepared = self.retriever.prepare(self.retrieval.method, query).await?;

        let store = self.store.read().await;
        let results = Retriever::rank(&prepared, store.documents(), self.retrieval.top_k);

        if results.is_empty() {
            return Ok(NO_MATCH_MESSAGE.to_string());
        }

        debug!(
            "Best match {} (similarity {:.3})",
            results[0].document.url, results[0].similarity
        );
        Ok(synthesize_response(
            query,
            &results,
            self.retrieval.related_threshold,
        ))
    }

    /// Read access to the document store
    pub async fn store(&self) -> RwLockReadGuard<'_, DocumentStore> {
        self.store.read().await
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    pub async fn stats(&self) -> StoreStats {
        let store = self.store.read().await;
        StoreStats {
            documents: store.len(),
            embedded_documents: store.embedded_count(),
            retrieval_method: self.retrieval.method.to_string(),
            embedding_provider: self.embedding_service.provider().to_string(),
            embedding_model: self.embedding_service.model().to_string(),
        }
    }
}
