use serde::{Deserialize, Serialize};

use super::defaults;

/// Corpus asset locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// CSV file with one row per video.
    pub records_path: String,
    /// `.npy` matrix with one embedding row per CSV row.
    pub embeddings_path: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            records_path: defaults::DEFAULT_RECORDS_PATH.to_string(),
            embeddings_path: defaults::DEFAULT_EMBEDDINGS_PATH.to_string(),
        }
    }
}
