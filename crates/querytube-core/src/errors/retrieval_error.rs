/// Ranking errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("top-k must be a positive integer, got {k}")]
    InvalidTopK { k: usize },

    #[error("query vector has {actual} dimensions, corpus has {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}
