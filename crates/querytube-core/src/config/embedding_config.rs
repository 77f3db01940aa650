use serde::{Deserialize, Serialize};

use super::defaults;

/// Query encoder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "onnx", "fastembed", "tfidf".
    pub provider: String,
    /// Path to the ONNX model file.
    pub model_path: Option<String>,
    /// Path to the HuggingFace `tokenizer.json` paired with the ONNX model.
    /// Defaults to `tokenizer.json` next to `model_path`.
    pub tokenizer_path: Option<String>,
    /// fastembed model code, e.g. "Qdrant/all-MiniLM-L6-v2-onnx".
    pub model_code: String,
    /// Embedding dimensions. Must match the corpus matrix.
    pub dimensions: usize,
    /// Batch size used when embedding the corpus.
    pub batch_size: usize,
    /// Number of distinct queries kept in the LRU cache.
    pub query_cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model_path: None,
            tokenizer_path: None,
            model_code: defaults::DEFAULT_FASTEMBED_MODEL.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            query_cache_size: defaults::DEFAULT_QUERY_CACHE_SIZE,
        }
    }
}
