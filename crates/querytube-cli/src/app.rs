//! Startup: resolve config layers and build the search service.

use std::sync::Arc;

use anyhow::Context;
use querytube_core::QueryTubeConfig;
use querytube_corpus::CorpusStore;
use querytube_embeddings::QueryEncoder;
use querytube_retrieval::SearchService;

use crate::args::Cli;

/// Config file → `QUERYTUBE_*` environment → command-line flags.
pub fn resolve_config(cli: &Cli) -> anyhow::Result<QueryTubeConfig> {
    resolve_config_with(cli, |key| std::env::var(key).ok())
}

/// [`resolve_config`] with an injectable environment lookup.
pub fn resolve_config_with<F>(cli: &Cli, env: F) -> anyhow::Result<QueryTubeConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config {
        Some(path) => QueryTubeConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => QueryTubeConfig::default(),
    };
    config.apply_overrides_from(env);

    if let Some(records) = &cli.records {
        config.corpus.records_path = records.display().to_string();
    }
    if let Some(embeddings) = &cli.embeddings {
        config.corpus.embeddings_path = embeddings.display().to_string();
    }
    if let Some(provider) = &cli.provider {
        config.embedding.provider = provider.clone();
    }
    if let Some(model) = &cli.model {
        config.embedding.model_path = Some(model.display().to_string());
    }
    if let Some(tokenizer) = &cli.tokenizer {
        config.embedding.tokenizer_path = Some(tokenizer.display().to_string());
    }

    config.validate()?;
    Ok(config)
}

/// Load the corpus, build the encoder, and wire both into a service.
///
/// Every failure here is a startup failure.
pub fn build_service(config: &QueryTubeConfig) -> anyhow::Result<SearchService> {
    let corpus = CorpusStore::from_config(&config.corpus).context("loading corpus assets")?;
    let encoder = QueryEncoder::from_config(&config.embedding)
        .with_context(|| format!("initializing `{}` provider", config.embedding.provider))?;

    let service = SearchService::new(
        Arc::new(corpus),
        Arc::new(encoder),
        config.retrieval.clone(),
    )
    .context("corpus and query encoder disagree")?;

    querytube_observability::tracing_setup::events::service_ready(
        service.corpus().len(),
        service.corpus().dimensions(),
        service.encoder().provider_name(),
        service.corpus().fingerprint(),
    );
    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["querytube"];
        argv.extend_from_slice(args);
        argv.push("inspect");
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn flags_override_environment() {
        let cli = cli(&["--provider", "tfidf"]);
        let config = resolve_config_with(&cli, |key| match key {
            "QUERYTUBE_PROVIDER" => Some("onnx".to_string()),
            "QUERYTUBE_RECORDS" => Some("env.csv".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.embedding.provider, "tfidf");
        assert_eq!(config.corpus.records_path, "env.csv");
    }

    #[test]
    fn model_and_tokenizer_flags_are_applied() {
        let cli = cli(&["--model", "m/model.onnx", "--tokenizer", "m/tokenizer.json"]);
        let config = resolve_config_with(&cli, |_| None).unwrap();
        assert_eq!(config.embedding.model_path.as_deref(), Some("m/model.onnx"));
        assert_eq!(config.embedding.tokenizer_path.as_deref(), Some("m/tokenizer.json"));
    }

    #[test]
    fn defaults_without_config_file() {
        let config = resolve_config_with(&cli(&[]), |_| None).unwrap();
        assert_eq!(config.corpus.records_path, "app_data.csv");
        assert_eq!(config.retrieval.default_top_k, 5);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = cli(&["--config", "/no/such/querytube.toml"]);
        assert!(resolve_config_with(&cli, |_| None).is_err());
    }

    #[test]
    fn config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("querytube.toml");
        std::fs::write(&path, "[retrieval]\ndefault_top_k = 9\n").unwrap();
        let cli = cli(&["--config", path.to_str().unwrap()]);
        let config = resolve_config_with(&cli, |_| None).unwrap();
        assert_eq!(config.retrieval.default_top_k, 9);
    }
}
