use serde::{Deserialize, Serialize};

use super::defaults;

/// How the ranker treats vectors with zero magnitude.
///
/// Cosine similarity is undefined when either side is the zero vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroVectorPolicy {
    /// Rank the row with a similarity of 0.0.
    #[default]
    ScoreZero,
    /// Drop the row from the candidates.
    Exclude,
}

/// Ranking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of results returned when the caller does not pass `k`.
    pub default_top_k: usize,
    pub zero_vector_policy: ZeroVectorPolicy,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_k: defaults::DEFAULT_TOP_K,
            zero_vector_policy: ZeroVectorPolicy::default(),
        }
    }
}
