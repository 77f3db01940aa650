//! Exhaustive top-k ranking against the corpus matrix.

use std::sync::Arc;

use querytube_core::config::ZeroVectorPolicy;
use querytube_core::errors::{QueryTubeResult, RetrievalError};
use querytube_core::RankedIndex;
use querytube_corpus::CorpusStore;
use tracing::debug;

use crate::similarity;

/// Scores every corpus row against a query vector.
pub struct Ranker {
    corpus: Arc<CorpusStore>,
    /// One norm per corpus row, computed once.
    row_norms: Vec<f64>,
    policy: ZeroVectorPolicy,
}

impl Ranker {
    pub fn new(corpus: Arc<CorpusStore>, policy: ZeroVectorPolicy) -> Self {
        let row_norms: Vec<f64> = corpus
            .embeddings()
            .outer_iter()
            .map(|row| match row.as_slice() {
                Some(slice) => similarity::norm(slice),
                None => similarity::norm(&row.to_vec()),
            })
            .collect();

        let zero_rows = row_norms
            .iter()
            .filter(|n| **n == 0.0)
            .count();
        if zero_rows > 0 {
            debug!(zero_rows, ?policy, "corpus contains zero-magnitude rows");
        }

        Self {
            corpus,
            row_norms,
            policy,
        }
    }

    pub fn corpus(&self) -> &CorpusStore {
        &self.corpus
    }

    pub fn policy(&self) -> ZeroVectorPolicy {
        self.policy
    }

    /// Return the `k` most similar rows, best first.
    ///
    /// Equal scores keep corpus order. `k` larger than the corpus returns
    /// every candidate row.
    ///
    /// # Errors
    /// `InvalidTopK` for `k == 0`. `DimensionMismatch` when the query length
    /// differs from a non-empty corpus's dimensionality.
    pub fn rank(&self, query: &[f32], k: usize) -> QueryTubeResult<Vec<RankedIndex>> {
        if k == 0 {
            return Err(RetrievalError::InvalidTopK { k }.into());
        }
        if self.corpus.is_empty() {
            return Ok(Vec::new());
        }
        let dims = self.corpus.dimensions();
        if query.len() != dims {
            return Err(RetrievalError::DimensionMismatch {
                expected: dims,
                actual: query.len(),
            }
            .into());
        }

        let query_norm = similarity::norm(query);
        let mut scored: Vec<RankedIndex> = Vec::with_capacity(self.corpus.len());
        for (index, row) in self.corpus.embeddings().outer_iter().enumerate() {
            let dot: f64 = row
                .iter()
                .zip(query)
                .map(|(r, q)| f64::from(*r) * f64::from(*q))
                .sum();
            match similarity::from_parts(dot, self.row_norms[index], query_norm) {
                Some(score) => scored.push(RankedIndex { index, score }),
                None => match self.policy {
                    ZeroVectorPolicy::ScoreZero => scored.push(RankedIndex { index, score: 0.0 }),
                    ZeroVectorPolicy::Exclude => {}
                },
            }
        }

        // sort_by is stable: ties stay in corpus order.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);
        Ok(scored)
    }
}
