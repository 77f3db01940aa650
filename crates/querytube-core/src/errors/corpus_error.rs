/// Corpus loading errors. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("required asset not found: {path}")]
    AssetMissing { path: String },

    #[error("corpus misaligned: {records} records but {embeddings} embedding rows")]
    CorpusMisaligned { records: usize, embeddings: usize },

    #[error("malformed records file {path}: {reason}")]
    MalformedRecords { path: String, reason: String },

    #[error("malformed embeddings file {path}: {reason}")]
    MalformedEmbeddings { path: String, reason: String },

    #[error("embedding matrix has {rows} rows but zero columns")]
    EmptyDimensions { rows: usize },
}
