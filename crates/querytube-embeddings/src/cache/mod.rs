//! Query embedding cache.
//!
//! A bounded in-memory cache keyed by the exact query text (case-sensitive,
//! no trimming). Eviction is least-recently-used; there is no time-based
//! expiry. Pending maintenance is flushed after every operation so eviction
//! order is exact rather than eventually consistent.

use std::sync::atomic::{AtomicU64, Ordering};

use moka::policy::EvictionPolicy;
use moka::sync::Cache;

/// Hit/miss counters for a [`QueryCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
}

impl CacheStats {
    /// Cache hit rate (0.0–1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of query vectors.
pub struct QueryCache {
    cache: Cache<String, Vec<f32>>,
    capacity: u64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl QueryCache {
    /// Create a cache holding at most `capacity` distinct queries.
    pub fn new(capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self {
            cache,
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a query vector, marking it most recently used.
    pub fn get(&self, query: &str) -> Option<Vec<f32>> {
        let found = self.cache.get(query);
        self.cache.run_pending_tasks();
        match found {
            Some(v) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(v)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Insert a query vector, evicting the least recently used entry when full.
    pub fn insert(&self, query: String, embedding: Vec<f32>) {
        self.cache.insert(query, embedding);
        self.cache.run_pending_tasks();
    }

    /// Whether `query` is cached. Does not touch recency.
    pub fn contains(&self, query: &str) -> bool {
        self.cache.contains_key(query)
    }

    /// Number of entries currently in the cache.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    /// Invalidate all entries.
    pub fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
    }
}
