//! Error taxonomy.
//!
//! One enum per subsystem, all funnelled into [`QueryTubeError`].
//! Corpus and config errors happen at startup and stop the process.
//! Embedding and retrieval errors are per-request and get reported back
//! to the caller.

mod config_error;
mod corpus_error;
mod embedding_error;
mod retrieval_error;

pub use config_error::ConfigError;
pub use corpus_error::CorpusError;
pub use embedding_error::EmbeddingError;
pub use retrieval_error::RetrievalError;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum QueryTubeError {
    #[error("corpus error: {0}")]
    CorpusError(#[from] CorpusError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl QueryTubeError {
    /// Whether the error should stop the process rather than fail one request.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            QueryTubeError::CorpusError(_) | QueryTubeError::ConfigError(_) | QueryTubeError::Io(_)
        )
    }
}

pub type QueryTubeResult<T> = Result<T, QueryTubeError>;
