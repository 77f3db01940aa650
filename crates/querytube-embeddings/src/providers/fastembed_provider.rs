//! fastembed provider.
//!
//! Downloads (once) and runs a sentence-embedding model through fastembed,
//! which bundles the matching tokenizer. Enabled with the `fastembed` feature.

use std::sync::Mutex;

use fastembed::{InitOptions, TextEmbedding};
use querytube_core::errors::{EmbeddingError, QueryTubeResult};
use querytube_core::traits::IEmbeddingProvider;
use tracing::debug;

/// Embedding provider backed by `fastembed::TextEmbedding`.
pub struct FastEmbedProvider {
    model: Mutex<TextEmbedding>,
    dimensions: usize,
    model_code: String,
}

impl FastEmbedProvider {
    /// Load the model whose fastembed code matches `model_code`.
    ///
    /// # Errors
    /// `ModelLoadFailed` for unknown codes or download/initialisation failures.
    pub fn load(model_code: &str) -> QueryTubeResult<Self> {
        let info = TextEmbedding::list_supported_models()
            .into_iter()
            .find(|m| m.model_code == model_code)
            .ok_or_else(|| EmbeddingError::ModelLoadFailed {
                path: model_code.to_string(),
                reason: "not a supported fastembed model".to_string(),
            })?;

        let model = TextEmbedding::try_new(
            InitOptions::new(info.model.clone()).with_show_download_progress(false),
        )
        .map_err(|e| EmbeddingError::ModelLoadFailed {
            path: model_code.to_string(),
            reason: e.to_string(),
        })?;

        debug!(model = model_code, dims = info.dim, "fastembed model loaded");

        Ok(Self {
            model: Mutex::new(model),
            dimensions: info.dim,
            model_code: model_code.to_string(),
        })
    }

    fn run(&self, texts: Vec<String>) -> QueryTubeResult<Vec<Vec<f32>>> {
        let mut model = self
            .model
            .lock()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("model lock poisoned: {e}"),
            })?;
        let embeddings = model
            .embed(texts, None)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: e.to_string(),
            })?;
        Ok(embeddings)
    }
}

impl IEmbeddingProvider for FastEmbedProvider {
    fn embed(&self, text: &str) -> QueryTubeResult<Vec<f32>> {
        self.run(vec![text.to_string()])?
            .pop()
            .ok_or_else(|| {
                EmbeddingError::InferenceFailed {
                    reason: "model returned no embedding".to_string(),
                }
                .into()
            })
    }

    fn embed_batch(&self, texts: &[String]) -> QueryTubeResult<Vec<Vec<f32>>> {
        self.run(texts.to_vec())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model_code
    }

    fn is_available(&self) -> bool {
        true
    }
}
