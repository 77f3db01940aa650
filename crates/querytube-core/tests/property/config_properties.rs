use proptest::prelude::*;
use querytube_core::config::*;
use querytube_core::errors::{ConfigError, QueryTubeError};

fn policy() -> impl Strategy<Value = ZeroVectorPolicy> {
    prop_oneof![Just(ZeroVectorPolicy::ScoreZero), Just(ZeroVectorPolicy::Exclude)]
}

fn valid_config() -> impl Strategy<Value = QueryTubeConfig> {
    (
        "[a-z_/]{1,24}\\.csv",
        prop::option::of("[a-z_/]{1,24}\\.onnx"),
        prop::option::of("[a-z_/]{1,24}\\.json"),
        1usize..4096,
        1usize..512,
        1u64..10_000,
        1usize..100,
        policy(),
        any::<bool>(),
    )
        .prop_map(
            |(records, model, tokenizer, dims, batch, cache, top_k, zero, json)| {
                let mut config = QueryTubeConfig::default();
                config.corpus.records_path = records;
                config.embedding.model_path = model;
                config.embedding.tokenizer_path = tokenizer;
                config.embedding.dimensions = dims;
                config.embedding.batch_size = batch;
                config.embedding.query_cache_size = cache;
                config.retrieval.default_top_k = top_k;
                config.retrieval.zero_vector_policy = zero;
                config.observability.json_logs = json;
                config
            },
        )
}

proptest! {
    #[test]
    fn toml_round_trip_keeps_every_field(config in valid_config()) {
        let text = toml::to_string(&config).unwrap();
        let back = QueryTubeConfig::from_toml(&text).unwrap();

        prop_assert_eq!(&back.corpus.records_path, &config.corpus.records_path);
        prop_assert_eq!(&back.corpus.embeddings_path, &config.corpus.embeddings_path);
        prop_assert_eq!(&back.embedding.provider, &config.embedding.provider);
        prop_assert_eq!(&back.embedding.model_path, &config.embedding.model_path);
        prop_assert_eq!(&back.embedding.tokenizer_path, &config.embedding.tokenizer_path);
        prop_assert_eq!(back.embedding.dimensions, config.embedding.dimensions);
        prop_assert_eq!(back.embedding.batch_size, config.embedding.batch_size);
        prop_assert_eq!(back.embedding.query_cache_size, config.embedding.query_cache_size);
        prop_assert_eq!(back.retrieval.default_top_k, config.retrieval.default_top_k);
        prop_assert_eq!(back.retrieval.zero_vector_policy, config.retrieval.zero_vector_policy);
        prop_assert_eq!(back.observability.json_logs, config.observability.json_logs);
    }

    #[test]
    fn any_zero_size_is_rejected(config in valid_config(), which in 0usize..4) {
        let mut config = config;
        let field = match which {
            0 => { config.embedding.query_cache_size = 0; "embedding.query_cache_size" }
            1 => { config.embedding.dimensions = 0; "embedding.dimensions" }
            2 => { config.embedding.batch_size = 0; "embedding.batch_size" }
            _ => { config.retrieval.default_top_k = 0; "retrieval.default_top_k" }
        };
        let err = config.validate().unwrap_err();
        match err {
            QueryTubeError::ConfigError(ConfigError::Invalid { field: got, .. }) => {
                prop_assert_eq!(got, field);
            }
            other => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn generated_configs_validate(config in valid_config()) {
        prop_assert!(config.validate().is_ok());
    }
}
