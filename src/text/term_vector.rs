//! Term-frequency vectors for the legacy retrieval path

use std::collections::HashMap;

/// Sparse bag-of-words vector: lower-cased term -> occurrence count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermVector {
    counts: HashMap<String, u32>,
}

/// Split on whitespace and lower-case every token
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

impl TermVector {
    /// Count the terms of `text`
    pub fn from_text(text: &str) -> Self {
        let mut counts = HashMap::new();
        for token in tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn norm(&self) -> f64 {
        self.counts
            .values()
            .map(|&c| f64::from(c) * f64::from(c))
            .sum::<f64>()
            .sqrt()
    }

    /// Cosine similarity between two term vectors, 0.0 if either is empty
    pub fn cosine(&self, other: &Self) -> f32 {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        let dot: f64 = small
            .counts
            .iter()
            .map(|(term, &count)| f64::from(count) * f64::from(large.get(term)))
            .sum();

        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            0.0
        } else {
            #[allow(clippy::cast_possible_truncation)]
            let score = (dot / denom) as f32;
            score
        }
    }
}
