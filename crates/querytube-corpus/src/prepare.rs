//! Offline corpus preparation: embed every record to build the `.npy` matrix.

use ndarray::Array2;
use querytube_core::errors::{EmbeddingError, QueryTubeResult};
use querytube_core::{CorpusRecord, IEmbeddingProvider};
use tracing::{debug, info};

/// Embed `records` in order, `batch_size` texts per provider call.
///
/// Row `i` of the result is the embedding of `records[i].embedding_text()`.
/// The matrix must be produced with the same provider that will encode
/// queries, or similarities are meaningless.
///
/// # Errors
/// Propagates provider failures. `DimensionMismatch` if the provider returns
/// a vector of the wrong length, `InferenceFailed` if a batch comes back
/// short.
pub fn embed_records(
    records: &[CorpusRecord],
    provider: &dyn IEmbeddingProvider,
    batch_size: usize,
) -> QueryTubeResult<Array2<f32>> {
    let dims = provider.dimensions();
    let batch_size = batch_size.max(1);
    let mut flat = Vec::with_capacity(records.len() * dims);

    for (batch_no, chunk) in records.chunks(batch_size).enumerate() {
        let texts: Vec<String> = chunk.iter().map(CorpusRecord::embedding_text).collect();
        let vectors = provider.embed_batch(&texts)?;
        if vectors.len() != chunk.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "batch {batch_no}: provider returned {} vectors for {} texts",
                    vectors.len(),
                    chunk.len()
                ),
            }
            .into());
        }
        for v in vectors {
            if v.len() != dims {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: dims,
                    actual: v.len(),
                }
                .into());
            }
            flat.extend(v);
        }
        debug!(batch = batch_no, size = chunk.len(), "embedded batch");
    }

    info!(
        records = records.len(),
        dims,
        provider = provider.name(),
        "corpus embedded"
    );

    Array2::from_shape_vec((records.len(), dims), flat).map_err(|e| {
        EmbeddingError::InferenceFailed {
            reason: e.to_string(),
        }
        .into()
    })
}
