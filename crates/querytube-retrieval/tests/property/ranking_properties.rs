use std::sync::Arc;

use ndarray::Array2;
use proptest::prelude::*;
use querytube_core::config::ZeroVectorPolicy;
use querytube_core::CorpusRecord;
use querytube_corpus::CorpusStore;
use querytube_retrieval::{cosine_similarity, Ranker};

const DIMS: usize = 4;

fn corpus(rows: &[Vec<f32>]) -> Arc<CorpusStore> {
    let records = (0..rows.len())
        .map(|i| CorpusRecord::new(format!("p{i}"), format!("prop {i}"), "", None))
        .collect();
    let flat: Vec<f32> = rows.iter().flatten().copied().collect();
    let matrix = Array2::from_shape_vec((rows.len(), DIMS), flat).unwrap();
    Arc::new(CorpusStore::from_parts(records, matrix).unwrap())
}

fn vector() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0f32..10.0, DIMS)
}

proptest! {
    #[test]
    fn returns_min_k_n_hits_in_descending_order(
        rows in prop::collection::vec(vector(), 0..30),
        query in vector(),
        k in 1usize..40,
    ) {
        let ranker = Ranker::new(corpus(&rows), ZeroVectorPolicy::ScoreZero);
        let hits = ranker.rank(&query, k).unwrap();
        prop_assert_eq!(hits.len(), k.min(rows.len()));
        for w in hits.windows(2) {
            prop_assert!(w[0].score >= w[1].score);
        }
    }

    #[test]
    fn scores_stay_in_unit_range(
        rows in prop::collection::vec(vector(), 1..20),
        query in vector(),
    ) {
        let ranker = Ranker::new(corpus(&rows), ZeroVectorPolicy::ScoreZero);
        for hit in ranker.rank(&query, rows.len()).unwrap() {
            prop_assert!((-1.0..=1.0).contains(&hit.score));
        }
    }

    #[test]
    fn indices_are_distinct_and_in_range(
        rows in prop::collection::vec(vector(), 1..20),
        query in vector(),
    ) {
        let ranker = Ranker::new(corpus(&rows), ZeroVectorPolicy::Exclude);
        let hits = ranker.rank(&query, rows.len()).unwrap();
        let mut seen = std::collections::HashSet::new();
        for hit in &hits {
            prop_assert!(hit.index < rows.len());
            prop_assert!(seen.insert(hit.index));
        }
    }

    #[test]
    fn top_hit_matches_pairwise_maximum(
        rows in prop::collection::vec(vector(), 1..20),
        query in vector(),
    ) {
        let ranker = Ranker::new(corpus(&rows), ZeroVectorPolicy::ScoreZero);
        let top = ranker.rank(&query, 1).unwrap()[0];
        let best = rows
            .iter()
            .map(|r| cosine_similarity(r, &query).unwrap_or(0.0))
            .fold(f32::NEG_INFINITY, f32::max);
        prop_assert!((top.score - best).abs() < 1e-5);
    }

    #[test]
    fn cosine_is_symmetric(a in vector(), b in vector()) {
        prop_assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }
}
