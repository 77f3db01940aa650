//! ONNX Runtime sentence-embedding provider.
//!
//! Loads an exported sentence-transformer and its HuggingFace tokenizer,
//! runs one forward pass per text and mean-pools the token embeddings under
//! the attention mask.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use querytube_core::errors::{EmbeddingError, QueryTubeResult};
use querytube_core::traits::IEmbeddingProvider;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::debug;

use crate::vector;

/// Longest token sequence fed to the model, special tokens included.
const MAX_SEQUENCE_LEN: usize = 512;

/// ONNX-based embedding provider.
pub struct OnnxProvider {
    /// `Session::run` takes `&mut self`.
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    dimensions: usize,
    model_name: String,
}

impl OnnxProvider {
    /// Load an ONNX model and the `tokenizer.json` it was exported with.
    ///
    /// # Errors
    /// Returns `EmbeddingError::ModelLoadFailed` if either file is missing or
    /// cannot be parsed.
    pub fn load(model_path: &str, tokenizer_path: &str, dimensions: usize) -> QueryTubeResult<Self> {
        let path = Path::new(model_path);
        if !path.exists() {
            return Err(load_failed(model_path, "model file not found"));
        }
        let tokenizer = load_tokenizer(tokenizer_path)?;

        let session = Session::builder()
            .map_err(|e| load_failed(model_path, e))?
            .with_intra_threads(2)
            .map_err(|e| load_failed(model_path, e))?
            .commit_from_file(model_path)
            .map_err(|e| load_failed(model_path, e))?;

        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("onnx-model")
            .to_string();

        debug!(model = %model_name, tokenizer = tokenizer_path, dims = dimensions, "ONNX model loaded");

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            dimensions,
            model_name,
        })
    }

    fn infer(&self, text: &str) -> QueryTubeResult<Vec<f32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| inference_failed(format!("tokenization failed: {e}")))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| i64::from(id)).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| i64::from(m))
            .collect();
        let seq_len = input_ids.len() as i64;

        let ids_tensor = Tensor::from_array((vec![1i64, seq_len], input_ids))
            .map_err(|e| inference_failed(format!("tensor creation error: {e}")))?;
        let mask_tensor = Tensor::from_array((vec![1i64, seq_len], attention_mask.clone()))
            .map_err(|e| inference_failed(format!("tensor creation error: {e}")))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| inference_failed(format!("session lock poisoned: {e}")))?;

        let outputs = session
            .run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor
            ])
            .map_err(|e| inference_failed(e.to_string()))?;

        let (_name, output) = outputs
            .iter()
            .next()
            .ok_or_else(|| inference_failed("no output tensor".to_string()))?;

        let (shape, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| inference_failed(format!("tensor extraction failed: {e}")))?;

        let mut embedding = mean_pool(&shape[..], data, &attention_mask)?;
        vector::l2_normalize(&mut embedding);
        vector::validate_dimensions(&embedding, self.dimensions)?;
        Ok(embedding)
    }
}

fn load_tokenizer(tokenizer_path: &str) -> QueryTubeResult<Tokenizer> {
    if !Path::new(tokenizer_path).exists() {
        return Err(load_failed(tokenizer_path, "tokenizer file not found"));
    }
    let mut tokenizer =
        Tokenizer::from_file(tokenizer_path).map_err(|e| load_failed(tokenizer_path, e))?;
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: MAX_SEQUENCE_LEN,
            ..Default::default()
        }))
        .map_err(|e| load_failed(tokenizer_path, e))?;
    Ok(tokenizer)
}

/// Average the token rows of a `[1, seq, dims]` output whose mask entry is
/// set. A `[1, dims]` output is taken as already pooled.
fn mean_pool(shape: &[i64], data: &[f32], mask: &[i64]) -> QueryTubeResult<Vec<f32>> {
    match *shape {
        [1, seq, dims] => {
            let (seq, dims) = (seq as usize, dims as usize);
            if data.len() < seq * dims || mask.len() < seq {
                return Err(inference_failed(format!(
                    "output shape {shape:?} does not match {} tokens",
                    mask.len()
                )));
            }
            let mut pooled = vec![0.0f32; dims];
            let mut kept = 0usize;
            for (token, _) in data
                .chunks_exact(dims)
                .take(seq)
                .zip(mask)
                .filter(|(_, m)| **m != 0)
            {
                for (acc, x) in pooled.iter_mut().zip(token) {
                    *acc += x;
                }
                kept += 1;
            }
            if kept > 0 {
                for v in &mut pooled {
                    *v /= kept as f32;
                }
            }
            Ok(pooled)
        }
        [1, dims] => Ok(data[..(dims as usize).min(data.len())].to_vec()),
        _ => Err(inference_failed(format!(
            "unexpected output shape: {shape:?}"
        ))),
    }
}

fn load_failed(path: &str, reason: impl std::fmt::Display) -> querytube_core::QueryTubeError {
    EmbeddingError::ModelLoadFailed {
        path: path.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

fn inference_failed(reason: String) -> querytube_core::QueryTubeError {
    EmbeddingError::InferenceFailed { reason }.into()
}

impl IEmbeddingProvider for OnnxProvider {
    fn embed(&self, text: &str) -> QueryTubeResult<Vec<f32>> {
        self.infer(text)
    }

    fn embed_batch(&self, texts: &[String]) -> QueryTubeResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.infer(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model_name
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use querytube_core::QueryTubeError;

    fn is_load_failure(err: &QueryTubeError, needle: &str) -> bool {
        matches!(
            err,
            QueryTubeError::EmbeddingError(EmbeddingError::ModelLoadFailed { reason, .. })
                if reason.contains(needle)
        )
    }

    #[test]
    fn missing_model_is_load_failure() {
        let err = OnnxProvider::load("/definitely/not/here.onnx", "/no/tokenizer.json", 768)
            .err()
            .unwrap();
        assert!(is_load_failure(&err, "model file not found"));
    }

    #[test]
    fn missing_tokenizer_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("model.onnx");
        std::fs::write(&model, b"not really onnx").unwrap();
        let tokenizer = dir.path().join("tokenizer.json");

        let err = OnnxProvider::load(
            model.to_str().unwrap(),
            tokenizer.to_str().unwrap(),
            768,
        )
        .err()
        .unwrap();
        assert!(is_load_failure(&err, "tokenizer file not found"));
    }

    #[test]
    fn unparseable_tokenizer_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let tokenizer = dir.path().join("tokenizer.json");
        std::fs::write(&tokenizer, "{ not json").unwrap();
        let err = load_tokenizer(tokenizer.to_str().unwrap()).err().unwrap();
        assert!(matches!(
            err,
            QueryTubeError::EmbeddingError(EmbeddingError::ModelLoadFailed { .. })
        ));
    }

    #[test]
    fn mean_pool_skips_masked_tokens() {
        // Three tokens of two dims; the padded third must not count.
        let data = [1.0, 2.0, 3.0, 4.0, 100.0, 100.0];
        let pooled = mean_pool(&[1, 3, 2], &data, &[1, 1, 0]).unwrap();
        assert_eq!(pooled, vec![2.0, 3.0]);
    }

    #[test]
    fn mean_pool_all_masked_is_zero() {
        let pooled = mean_pool(&[1, 2, 2], &[5.0; 4], &[0, 0]).unwrap();
        assert_eq!(pooled, vec![0.0, 0.0]);
    }

    #[test]
    fn mean_pool_passes_pooled_output_through() {
        let pooled = mean_pool(&[1, 3], &[0.5, 0.25, 0.125], &[1]).unwrap();
        assert_eq!(pooled, vec![0.5, 0.25, 0.125]);
    }

    #[test]
    fn mean_pool_rejects_other_shapes() {
        assert!(mean_pool(&[2, 2, 2], &[0.0; 8], &[1, 1]).is_err());
        assert!(mean_pool(&[1, 4, 2], &[0.0; 4], &[1, 1, 1, 1]).is_err());
    }
}
