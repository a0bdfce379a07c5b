//! JSON-file document store
//!
//! All documents live in memory. The backing file is a JSON array rewritten
//! wholesale on every change; writes go to a sibling temp file first and are
//! renamed into place.

use std::path::Path;
use std::path::PathBuf;

use tracing::info;
use tracing::warn;

use crate::embeddings::EmbeddingService;
use crate::models::Document;
use crate::Result;

pub struct DocumentStore {
    path: PathBuf,
    documents: Vec<Document>,
}

impl DocumentStore {
    /// Open the store at `path`, creating its directory if needed
    ///
    /// Records without an embedding, or embedded by a different model than
    /// the active one, get a fresh embedding from their cleaned text; if any
    /// were filled in, the file is rewritten.
    pub async fn open(path: impl Into<PathBuf>, embedder: &EmbeddingService) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                info!("Creating sources directory {}", parent.display());
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        if !path.exists() {
            info!("No sources file at {}, starting empty", path.display());
            return Ok(Self {
                path,
                documents: Vec::new(),
            });
        }

        let content = tokio::fs::read_to_string(&path).await?;
        let mut documents: Vec<Document> = if content.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&content)?
        };

        for doc in &mut documents {
            doc.refresh_term_vector();
        }
        let backfilled = backfill_embeddings(&mut documents, embedder).await;

        let store = Self { path, documents };
        if backfilled > 0 {
            warn!("Backfilled {} missing embeddings, rewriting sources file", backfilled);
            store.save().await?;
        }

        info!(
            "Loaded {} documents from {}",
            store.documents.len(),
            store.path.display()
        );
        Ok(store)
    }

    /// Empty store that persists to `path`, without touching the filesystem yet
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            documents: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Most recently ingested document for `url`
    pub fn get(&self, url: &str) -> Option<&Document> {
        self.documents.iter().rev().find(|d| d.url == url)
    }

    pub fn embedded_count(&self) -> usize {
        self.documents.iter().filter(|d| d.has_embedding()).count()
    }

    /// Append a document and persist; returns the new document count
    pub async fn add(&mut self, document: Document) -> Result<usize> {
        self.documents.push(document);
        if let Err(e) = self.save().await {
            self.documents.pop();
            return Err(e);
        }
        Ok(self.documents.len())
    }

    /// Rewrite the backing file with the current documents
    pub async fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.documents)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// Embed every record not already embedded by the active model
///
/// Returns the number of records that received a new embedding. Records with
/// blank text, or whose embedding fails, are left without one.
async fn backfill_embeddings(documents: &mut [Document], embedder: &EmbeddingService) -> usize {
    let model = embedder.model();
    let mut pending = Vec::new();

    for (i, doc) in documents.iter_mut().enumerate() {
        if doc.embedded_with(model) {
            let len = doc.embedding.as_ref().map_or(0, Vec::len);
            if len != embedder.dimension() {
                warn!(
                    "{} has a {}-dimensional embedding, configured dimension is {}",
                    truncate_url(&doc.url),
                    len,
                    embedder.dimension()
                );
            }
            continue;
        }

        if doc.has_embedding() {
            warn!(
                "{} was embedded by {}, re-embedding with {}",
                truncate_url(&doc.url),
                doc.embedding_model.as_deref().unwrap_or("an unknown model"),
                model
            );
            doc.embedding = None;
            doc.embedding_model = None;
        }

        if doc.text.trim().is_empty() {
            warn!("Skipping embedding for {}: no text", truncate_url(&doc.url));
        } else {
            pending.push(i);
        }
    }

    if pending.is_empty() {
        return 0;
    }

    info!("Generating embeddings for {} documents...", pending.len());
    let texts: Vec<&str> = pending.iter().map(|&i| documents[i].text.as_str()).collect();
    let results: Vec<Result<Vec<f32>>> = match embedder.embed_documents(&texts).await {
        Ok(embeddings) => embeddings.into_iter().map(Ok).collect(),
        Err(e) => {
            warn!("Batch embedding failed ({}), retrying one document at a time", e);
            let mut results = Vec::with_capacity(texts.len());
            for text in &texts {
                results.push(embedder.embed_document(text).await);
            }
            results
        }
    };

    let mut backfilled = 0;
    for (i, result) in pending.into_iter().zip(results) {
        let doc = &mut documents[i];
        match result {
            Ok(embedding) => {
                doc.set_embedding(embedding, model);
                backfilled += 1;
            }
            Err(e) => warn!("Skipping embedding for {}: {}", truncate_url(&doc.url), e),
        }
    }
    backfilled
}

fn truncate_url(url: &str) -> String {
    url.chars().take(50).collect()
}
