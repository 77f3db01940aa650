//! `.npy` embedding matrix I/O.

use std::path::Path;

use ndarray::Array2;
use ndarray_npy::{read_npy, write_npy};
use querytube_core::errors::{CorpusError, QueryTubeResult};

/// Read a 2-D embedding matrix. `f64` files are narrowed to `f32`.
///
/// The result is always in standard (row-major) layout, so every row is a
/// contiguous slice.
///
/// # Errors
/// `AssetMissing` if the file does not exist, `MalformedEmbeddings` if it is
/// not a 2-D float array.
pub fn read_embeddings(path: &Path) -> QueryTubeResult<Array2<f32>> {
    if !path.exists() {
        return Err(CorpusError::AssetMissing {
            path: path.display().to_string(),
        }
        .into());
    }

    let matrix = match read_npy::<_, Array2<f32>>(path) {
        Ok(m) => m,
        Err(f32_err) => match read_npy::<_, Array2<f64>>(path) {
            Ok(m) => m.mapv(|v| v as f32),
            Err(_) => {
                return Err(CorpusError::MalformedEmbeddings {
                    path: path.display().to_string(),
                    reason: f32_err.to_string(),
                }
                .into())
            }
        },
    };

    if matrix.is_standard_layout() {
        Ok(matrix)
    } else {
        Ok(matrix.as_standard_layout().into_owned())
    }
}

/// Write an embedding matrix as `.npy`.
pub fn write_embeddings(path: &Path, matrix: &Array2<f32>) -> QueryTubeResult<()> {
    write_npy(path, matrix).map_err(|e| CorpusError::MalformedEmbeddings {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}
