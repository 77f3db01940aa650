//! Layered configuration: TOML file → environment overrides → CLI flags.
//!
//! Every section is `#[serde(default)]`, so an empty file is a valid config.

pub mod corpus_config;
pub mod defaults;
pub mod embedding_config;
pub mod observability_config;
pub mod retrieval_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use corpus_config::CorpusConfig;
pub use embedding_config::EmbeddingConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::{RetrievalConfig, ZeroVectorPolicy};

use crate::errors::{ConfigError, QueryTubeResult};

/// Environment variable overriding `corpus.records_path`.
pub const ENV_RECORDS_PATH: &str = "QUERYTUBE_RECORDS";
/// Environment variable overriding `corpus.embeddings_path`.
pub const ENV_EMBEDDINGS_PATH: &str = "QUERYTUBE_EMBEDDINGS";
/// Environment variable overriding `embedding.provider`.
pub const ENV_PROVIDER: &str = "QUERYTUBE_PROVIDER";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryTubeConfig {
    pub corpus: CorpusConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub observability: ObservabilityConfig,
}

impl QueryTubeConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml(text: &str) -> QueryTubeResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> QueryTubeResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Apply `QUERYTUBE_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_RECORDS_PATH) {
            self.corpus.records_path = path;
        }
        if let Some(path) = lookup(ENV_EMBEDDINGS_PATH) {
            self.corpus.embeddings_path = path;
        }
        if let Some(provider) = lookup(ENV_PROVIDER) {
            self.embedding.provider = provider;
        }
    }

    /// Reject values the search pipeline cannot run with.
    pub fn validate(&self) -> QueryTubeResult<()> {
        if self.embedding.query_cache_size == 0 {
            return Err(invalid("embedding.query_cache_size", "must be at least 1"));
        }
        if self.embedding.dimensions == 0 {
            return Err(invalid("embedding.dimensions", "must be at least 1"));
        }
        if self.embedding.batch_size == 0 {
            return Err(invalid("embedding.batch_size", "must be at least 1"));
        }
        if self.retrieval.default_top_k == 0 {
            return Err(invalid("retrieval.default_top_k", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> crate::errors::QueryTubeError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
