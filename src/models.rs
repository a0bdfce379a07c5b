use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::text::TermVector;

/// An ingested web page
///
/// Serialized as one record of the sources JSON file. The term vector used by
/// legacy retrieval is rebuilt from `text` and never written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub url: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    /// Model that produced `embedding`; records without one predate tagging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingested_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub term_vector: TermVector,
}

impl Document {
    /// New document stamped with the current time
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let term_vector = TermVector::from_text(&text);
        Self {
            url: url.into(),
            text,
            embedding: None,
            embedding_model: None,
            ingested_at: Some(Utc::now()),
            term_vector,
        }
    }

    #[must_use]
    pub fn with_embedding(mut self, embedding: Vec<f32>, model: impl Into<String>) -> Self {
        self.set_embedding(embedding, model);
        self
    }

    pub fn set_embedding(&mut self, embedding: Vec<f32>, model: impl Into<String>) {
        self.embedding = Some(embedding);
        self.embedding_model = Some(model.into());
    }

    /// Whether the stored embedding was produced by `model`
    pub fn embedded_with(&self, model: &str) -> bool {
        self.embedding.is_some() && self.embedding_model.as_deref() == Some(model)
    }

    pub fn has_embedding(&self) -> bool {
        self.embedding.is_some()
    }

    /// Rebuild the in-memory term vector from `text`
    pub fn refresh_term_vector(&mut self) {
        self.term_vector = TermVector::from_text(&self.text);
    }

    /// Case-insensitive substring test against the page text
    pub fn mentions(&self, phrase: &str) -> bool {
        self.text.to_lowercase().contains(&phrase.to_lowercase())
    }

    /// Text length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Aggregate numbers about the document store
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub documents: usize,
    pub embedded_documents: usize,
    pub retrieval_method: String,
    pub embedding_provider: String,
    pub embedding_model: String,
}
