use querytube_core::IEmbeddingProvider;
use querytube_embeddings::{QueryEncoder, TfIdfFallback};
use proptest::prelude::*;

proptest! {
    #[test]
    fn encode_is_deterministic(q in ".{0,80}") {
        let encoder = QueryEncoder::new(Box::new(TfIdfFallback::new(64)), 4);
        let first = encoder.encode(&q).unwrap();
        let second = encoder.encode(&q).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn cached_equals_uncached(q in ".{0,80}") {
        let provider = TfIdfFallback::new(64);
        let uncached = provider.embed(&q).unwrap();
        let encoder = QueryEncoder::new(Box::new(TfIdfFallback::new(64)), 4);
        encoder.encode(&q).unwrap();
        let cached = encoder.encode(&q).unwrap();
        prop_assert_eq!(uncached, cached);
    }

    #[test]
    fn cache_never_exceeds_capacity(queries in prop::collection::vec("[a-z]{1,8}", 1..40), cap in 1u64..8) {
        let encoder = QueryEncoder::new(Box::new(TfIdfFallback::new(16)), cap);
        for q in &queries {
            encoder.encode(q).unwrap();
        }
        prop_assert!(encoder.cache().len() <= cap);
    }

    #[test]
    fn fresh_providers_agree_bit_for_bit(words in prop::collection::vec("[a-z]{2,10}", 1..40), dims in 1usize..5) {
        let text = words.join(" ");
        let bits = |v: Vec<f32>| v.into_iter().map(f32::to_bits).collect::<Vec<_>>();
        let first = bits(TfIdfFallback::new(dims).embed(&text).unwrap());
        let second = bits(TfIdfFallback::new(dims).embed(&text).unwrap());
        prop_assert_eq!(first, second);
    }
}
