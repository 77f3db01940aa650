//! SearchService: the query-to-results pipeline shared by every request.

use std::sync::Arc;

use querytube_core::config::RetrievalConfig;
use querytube_core::errors::{EmbeddingError, QueryTubeResult, RetrievalError};
use querytube_core::models::{SearchPhase, SearchResponse};
use querytube_core::{RankedHit, SearchOutcome};
use querytube_corpus::CorpusStore;
use querytube_embeddings::QueryEncoder;
use tracing::{debug, info_span, warn};

use crate::ranker::Ranker;

/// Owns the ranker and a shared encoder. Immutable after construction, so a
/// single instance can serve concurrent callers.
pub struct SearchService {
    encoder: Arc<QueryEncoder>,
    ranker: Ranker,
    config: RetrievalConfig,
}

impl SearchService {
    /// Build the service.
    ///
    /// # Errors
    /// `DimensionMismatch` when the encoder's dimensionality differs from a
    /// non-empty corpus's.
    pub fn new(
        corpus: Arc<CorpusStore>,
        encoder: Arc<QueryEncoder>,
        config: RetrievalConfig,
    ) -> QueryTubeResult<Self> {
        if !corpus.is_empty() && encoder.dimensions() != corpus.dimensions() {
            return Err(EmbeddingError::DimensionMismatch {
                expected: corpus.dimensions(),
                actual: encoder.dimensions(),
            }
            .into());
        }
        let ranker = Ranker::new(corpus, config.zero_vector_policy);
        Ok(Self {
            encoder,
            ranker,
            config,
        })
    }

    pub fn corpus(&self) -> &CorpusStore {
        self.ranker.corpus()
    }

    pub fn encoder(&self) -> &QueryEncoder {
        &self.encoder
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Search the corpus for `query`, returning at most `k` hits.
    ///
    /// A blank query returns `EmptyQuery` without touching the encoder.
    ///
    /// # Errors
    /// `InvalidTopK` for `k == 0`, or the encoder's error.
    pub fn search(&self, query: &str, k: usize) -> QueryTubeResult<SearchOutcome> {
        if query.trim().is_empty() {
            return Ok(SearchOutcome::EmptyQuery);
        }

        let _span = info_span!("search", query_len = query.len(), k).entered();

        if k == 0 {
            return Err(RetrievalError::InvalidTopK { k }.into());
        }

        let vector = self.encoder.encode(query)?;
        let ranked = self.ranker.rank(&vector, k)?;
        if ranked.is_empty() {
            debug!("no rankable rows");
            return Ok(SearchOutcome::NoResults);
        }

        let corpus = self.ranker.corpus();
        let hits: Vec<RankedHit> = ranked
            .into_iter()
            .filter_map(|r| {
                corpus.record(r.index).map(|record| RankedHit {
                    index: r.index,
                    score: r.score,
                    record: record.clone(),
                })
            })
            .collect();

        debug!(
            hits = hits.len(),
            top_score = ?hits.first().map(|h| h.score),
            "search complete"
        );
        Ok(SearchOutcome::Ranked(hits))
    }

    /// [`search`](Self::search) with the configured `default_top_k`.
    pub fn search_default(&self, query: &str) -> QueryTubeResult<SearchOutcome> {
        self.search(query, self.config.default_top_k)
    }

    /// Run a search for a presenter.
    ///
    /// `on_progress` receives `Searching` once before the computation and
    /// `Done` once after it. Blank queries emit nothing. Errors are captured
    /// in the response instead of being returned.
    pub fn respond<F>(&self, query: &str, k: usize, mut on_progress: F) -> SearchResponse
    where
        F: FnMut(SearchPhase),
    {
        if query.trim().is_empty() {
            return SearchResponse::from_outcome(query, SearchOutcome::EmptyQuery);
        }

        on_progress(SearchPhase::Searching);
        let result = self.search(query, k);
        on_progress(SearchPhase::Done);

        match result {
            Ok(outcome) => SearchResponse::from_outcome(query, outcome),
            Err(e) => {
                warn!(error = %e, "search failed");
                SearchResponse::failed(query, e)
            }
        }
    }
}
