//! Embedding providers and the config-driven factory.

#[cfg(feature = "fastembed")]
mod fastembed_provider;
mod onnx_provider;
mod tfidf_fallback;

#[cfg(feature = "fastembed")]
pub use fastembed_provider::FastEmbedProvider;
pub use onnx_provider::OnnxProvider;
pub use tfidf_fallback::TfIdfFallback;

use std::path::Path;

use querytube_core::config::EmbeddingConfig;
use querytube_core::errors::{EmbeddingError, QueryTubeResult};
use querytube_core::traits::IEmbeddingProvider;
use tracing::info;

/// Build the provider named by `config.provider`.
///
/// There is no silent fallback: a provider that cannot load is an error,
/// since a substitute would produce vectors in a different space than the
/// corpus.
pub fn create_provider(config: &EmbeddingConfig) -> QueryTubeResult<Box<dyn IEmbeddingProvider>> {
    let provider: Box<dyn IEmbeddingProvider> = match config.provider.as_str() {
        "onnx" => {
            let path = config
                .model_path
                .as_deref()
                .ok_or_else(|| EmbeddingError::ModelLoadFailed {
                    path: "<unset>".to_string(),
                    reason: "embedding.model_path is required for the onnx provider".to_string(),
                })?;
            let tokenizer = tokenizer_path(config, path);
            Box::new(OnnxProvider::load(path, &tokenizer, config.dimensions)?)
        }
        "fastembed" => fastembed_provider(config)?,
        "tfidf" => Box::new(TfIdfFallback::new(config.dimensions)),
        other => {
            return Err(EmbeddingError::UnknownProvider {
                provider: other.to_string(),
            }
            .into())
        }
    };

    info!(
        provider = provider.name(),
        dims = provider.dimensions(),
        "embedding provider ready"
    );
    Ok(provider)
}

/// `embedding.tokenizer_path`, or `tokenizer.json` beside the model.
fn tokenizer_path(config: &EmbeddingConfig, model_path: &str) -> String {
    match &config.tokenizer_path {
        Some(path) => path.clone(),
        None => Path::new(model_path)
            .with_file_name("tokenizer.json")
            .display()
            .to_string(),
    }
}

#[cfg(feature = "fastembed")]
fn fastembed_provider(config: &EmbeddingConfig) -> QueryTubeResult<Box<dyn IEmbeddingProvider>> {
    let provider = FastEmbedProvider::load(&config.model_code)?;
    if provider.dimensions() != config.dimensions {
        tracing::warn!(
            configured = config.dimensions,
            model = provider.dimensions(),
            "fastembed model dimensions differ from embedding.dimensions"
        );
    }
    Ok(Box::new(provider))
}

#[cfg(not(feature = "fastembed"))]
fn fastembed_provider(_config: &EmbeddingConfig) -> QueryTubeResult<Box<dyn IEmbeddingProvider>> {
    Err(EmbeddingError::ProviderUnavailable {
        provider: "fastembed (built without the `fastembed` feature)".to_string(),
    }
    .into())
}
