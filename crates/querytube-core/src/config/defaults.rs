// Single source of truth for all default values.

// --- Corpus ---
pub const DEFAULT_RECORDS_PATH: &str = "app_data.csv";
pub const DEFAULT_EMBEDDINGS_PATH: &str = "app_embeddings.npy";

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "onnx";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 768;
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 32;
pub const DEFAULT_QUERY_CACHE_SIZE: u64 = 128;
pub const DEFAULT_FASTEMBED_MODEL: &str = "Qdrant/all-MiniLM-L6-v2-onnx";

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 5;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
