//! Offline hashed bag-of-words provider.
//!
//! Each lowercase term of two or more characters is hashed into one of
//! `dimensions` buckets. Needs no model files, so a corpus prepared with it
//! can be searched anywhere, but it only matches shared vocabulary.

use std::collections::BTreeMap;

use querytube_core::errors::QueryTubeResult;
use querytube_core::traits::IEmbeddingProvider;

use crate::vector;

/// Hashed bag-of-words provider, registered as `tfidf`.
///
/// A term's weight is `(1 + ln count) * ln(1 + chars)`: repeats grow
/// sublinearly and short, stopword-like terms count for less. Terms are
/// accumulated in sorted order so equal input gives bit-identical output.
pub struct TfIdfFallback {
    dimensions: usize,
}

impl TfIdfFallback {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn bucket(&self, term: &str) -> usize {
        let digest = blake3::hash(term.as_bytes());
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest.as_bytes()[..8]);
        (u64::from_le_bytes(head) % self.dimensions.max(1) as u64) as usize
    }

    /// Term counts keyed by lowercase term.
    fn term_counts(text: &str) -> BTreeMap<String, u32> {
        let mut counts = BTreeMap::new();
        for term in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|s| s.chars().count() >= 2)
        {
            *counts.entry(term.to_lowercase()).or_insert(0) += 1;
        }
        counts
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut out = vec![0.0f32; self.dimensions];
        if self.dimensions == 0 {
            return out;
        }
        for (term, count) in Self::term_counts(text) {
            let repeats = 1.0 + (count as f32).ln();
            let length = (1.0 + term.chars().count() as f32).ln();
            out[self.bucket(&term)] += repeats * length;
        }
        vector::l2_normalize(&mut out);
        out
    }
}

impl IEmbeddingProvider for TfIdfFallback {
    fn embed(&self, text: &str) -> QueryTubeResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> QueryTubeResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "tfidf-fallback"
    }

    fn is_available(&self) -> bool {
        true
    }
}
