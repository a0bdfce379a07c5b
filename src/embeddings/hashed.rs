//! Offline feature-hashing embeddings
//!
//! Every lower-cased alphanumeric token, and every pair of adjacent tokens, is
//! hashed with SHA-256 into one of `dimension` buckets with a hash-derived
//! sign. The result is L2-normalised. Vectors are deterministic across runs
//! and platforms, so they can be persisted alongside documents.

use sha2::Digest;
use sha2::Sha256;

const BIGRAM_WEIGHT: f32 = 0.5;

/// Model name reported for, and tagged onto, hashed embeddings
pub const HASHED_MODEL: &str = "hashed";

/// Deterministic bag-of-words embedder that needs no model or network
#[derive(Debug, Clone)]
pub struct HashedEmbedder {
    dimension: usize,
}

impl HashedEmbedder {
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Embed `text`; text without any word yields the zero vector
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.dimension];
        let tokens: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .collect();

        for token in &tokens {
            self.accumulate(&mut vector, token, 1.0);
        }
        for pair in tokens.windows(2) {
            self.accumulate(&mut vector, &format!("{} {}", pair[0], pair[1]), BIGRAM_WEIGHT);
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }

    fn accumulate(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let digest = Sha256::digest(feature.as_bytes());
        let mut bucket_bytes = [0_u8; 8];
        bucket_bytes.copy_from_slice(&digest[..8]);

        #[allow(clippy::cast_possible_truncation)]
        let bucket = (u64::from_le_bytes(bucket_bytes) % self.dimension as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign * weight;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::retriever::cosine_similarity;

    #[test]
    fn test_dimension_and_norm() {
        let embedder = HashedEmbedder::new(64);
        let v = embedder.embed("burning man principles");
        assert_eq!(v.len(), 64);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_deterministic_and_case_insensitive() {
        let embedder = HashedEmbedder::new(384);
        assert_eq!(embedder.embed("Radical Inclusion"), embedder.embed("radical inclusion"));
    }

    #[test]
    fn test_no_words_is_zero_vector() {
        let embedder = HashedEmbedder::new(16);
        assert!(embedder.embed("  !!! ... ").iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_related_text_scores_higher() {
        let embedder = HashedEmbedder::new(384);
        let query = embedder.embed("leaving no trace in the desert");
        let related = embedder.embed("we are committed to leaving no trace wherever we gather in the desert");
        let unrelated = embedder.embed("quarterly earnings rose on strong semiconductor demand");
        assert!(cosine_similarity(&query, &related) > cosine_similarity(&query, &unrelated));
    }
}
