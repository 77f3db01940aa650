//! Query encoder behaviour that callers depend on: cache eviction order,
//! determinism, and error handling.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;

use querytube_core::errors::EmbeddingError;
use querytube_core::QueryTubeError;
use querytube_embeddings::{QueryEncoder, TfIdfFallback};
use test_fixtures::{CountingProvider, FailingProvider, FixedProvider};

fn counting_encoder(capacity: u64) -> (QueryEncoder, Arc<std::sync::atomic::AtomicUsize>) {
    let provider = CountingProvider::new(Box::new(FixedProvider::new(4)));
    let counter = provider.counter();
    (QueryEncoder::new(Box::new(provider), capacity), counter)
}

#[test]
fn repeated_query_hits_the_provider_once() {
    let (encoder, calls) = counting_encoder(8);
    let a = encoder.encode("the fermi paradox").unwrap();
    let b = encoder.encode("the fermi paradox").unwrap();
    assert_eq!(a, b);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn cache_key_is_case_sensitive() {
    let (encoder, calls) = counting_encoder(8);
    encoder.encode("Mars").unwrap();
    encoder.encode("mars").unwrap();
    encoder.encode("mars ").unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn overflow_evicts_lru_and_requery_reencodes() {
    let (encoder, calls) = counting_encoder(3);
    for q in ["q1", "q2", "q3"] {
        encoder.encode(q).unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(encoder.cache().len(), 3);

    // One more distinct query pushes out "q1", the least recently used.
    encoder.encode("q4").unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert!(!encoder.cache().contains("q1"));
    assert_eq!(encoder.cache().len(), 3);

    // Still cached.
    encoder.encode("q3").unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 4);

    // Evicted: must be encoded again.
    encoder.encode("q1").unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 5);
}

#[test]
fn recently_used_entry_survives_eviction() {
    let (encoder, calls) = counting_encoder(2);
    encoder.encode("old").unwrap();
    encoder.encode("newer").unwrap();
    // Refresh "old"; "newer" is now the LRU entry.
    encoder.encode("old").unwrap();
    encoder.encode("newest").unwrap();

    assert!(encoder.cache().contains("old"));
    assert!(!encoder.cache().contains("newer"));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn provider_failure_surfaces_and_is_not_cached() {
    let provider = CountingProvider::new(Box::new(FailingProvider { dimensions: 4 }));
    let calls = provider.counter();
    let encoder = QueryEncoder::new(Box::new(provider), 4);

    let err = encoder.encode("anything").unwrap_err();
    assert!(matches!(
        err,
        QueryTubeError::EmbeddingError(EmbeddingError::InferenceFailed { .. })
    ));
    assert!(!err.is_fatal());
    assert!(encoder.cache().is_empty());

    // The next call goes to the provider again.
    let _ = encoder.encode("anything");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn wrong_sized_vector_is_rejected() {
    struct Liar;
    impl querytube_core::IEmbeddingProvider for Liar {
        fn embed(&self, _text: &str) -> querytube_core::QueryTubeResult<Vec<f32>> {
            Ok(vec![1.0; 3])
        }
        fn embed_batch(
            &self,
            texts: &[String],
        ) -> querytube_core::QueryTubeResult<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0; 3]).collect())
        }
        fn dimensions(&self) -> usize {
            8
        }
        fn name(&self) -> &str {
            "liar"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    let encoder = QueryEncoder::new(Box::new(Liar), 4);
    let err = encoder.encode("q").unwrap_err();
    assert!(matches!(
        err,
        QueryTubeError::EmbeddingError(EmbeddingError::DimensionMismatch {
            expected: 8,
            actual: 3
        })
    ));
    assert!(encoder.cache().is_empty());
}

#[test]
fn encoder_is_shareable_across_threads() {
    let encoder = Arc::new(QueryEncoder::new(Box::new(TfIdfFallback::new(64)), 16));
    let expected = encoder.encode("shared query").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let encoder = Arc::clone(&encoder);
            thread::spawn(move || encoder.encode("shared query").unwrap())
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}
