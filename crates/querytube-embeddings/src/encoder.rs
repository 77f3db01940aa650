//! QueryEncoder: the main entry point for querytube-embeddings.
//!
//! Wraps one provider with a bounded LRU cache. Identical query text always
//! maps to the identical vector; only the first call for a given text reaches
//! the provider.

use querytube_core::config::EmbeddingConfig;
use querytube_core::errors::QueryTubeResult;
use querytube_core::traits::IEmbeddingProvider;
use tracing::{debug, info};

use crate::cache::{CacheStats, QueryCache};
use crate::providers;
use crate::vector;

/// Cached query encoder.
///
/// The cache is thread-safe, so one encoder can be shared behind an `Arc`
/// by every request handler.
pub struct QueryEncoder {
    provider: Box<dyn IEmbeddingProvider>,
    cache: QueryCache,
}

impl QueryEncoder {
    /// Create an encoder around an explicit provider.
    pub fn new(provider: Box<dyn IEmbeddingProvider>, cache_capacity: u64) -> Self {
        info!(
            provider = provider.name(),
            dims = provider.dimensions(),
            cache_capacity,
            "QueryEncoder initialized"
        );
        Self {
            provider,
            cache: QueryCache::new(cache_capacity),
        }
    }

    /// Create an encoder with the provider named in `config`.
    ///
    /// # Errors
    /// Fails when the provider is unknown or its model cannot be loaded.
    pub fn from_config(config: &EmbeddingConfig) -> QueryTubeResult<Self> {
        let provider = providers::create_provider(config)?;
        Ok(Self::new(provider, config.query_cache_size))
    }

    /// Encode a query. Empty text is accepted.
    ///
    /// # Errors
    /// Propagates provider failures and dimension mismatches. Failures are
    /// not cached, so the next call retries the provider.
    pub fn encode(&self, query: &str) -> QueryTubeResult<Vec<f32>> {
        if let Some(vec) = self.cache.get(query) {
            debug!(query_len = query.len(), "query cache hit");
            return Ok(vec);
        }

        debug!(
            query_len = query.len(),
            provider = self.provider.name(),
            "query cache miss, encoding"
        );
        let embedding = self.provider.embed(query)?;
        vector::validate_dimensions(&embedding, self.provider.dimensions())?;

        self.cache.insert(query.to_string(), embedding.clone());
        Ok(embedding)
    }

    /// Embed many texts without touching the query cache.
    pub fn encode_batch(&self, texts: &[String]) -> QueryTubeResult<Vec<Vec<f32>>> {
        let embeddings = self.provider.embed_batch(texts)?;
        for e in &embeddings {
            vector::validate_dimensions(e, self.provider.dimensions())?;
        }
        Ok(embeddings)
    }

    /// Dimensionality of produced vectors.
    pub fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Access the underlying provider.
    pub fn provider(&self) -> &dyn IEmbeddingProvider {
        self.provider.as_ref()
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
