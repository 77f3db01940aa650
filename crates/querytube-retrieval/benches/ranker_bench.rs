use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::Array2;
use querytube_core::config::{RetrievalConfig, ZeroVectorPolicy};
use querytube_core::CorpusRecord;
use querytube_corpus::CorpusStore;
use querytube_embeddings::{QueryEncoder, TfIdfFallback};
use querytube_retrieval::{Ranker, SearchService};

const ROWS: usize = 2_000;
const DIMS: usize = 384;

fn synthetic_corpus() -> Arc<CorpusStore> {
    let records = (0..ROWS)
        .map(|i| CorpusRecord::new(format!("v{i}"), format!("video {i}"), "", None))
        .collect();
    let matrix = Array2::from_shape_fn((ROWS, DIMS), |(r, c)| ((r * 31 + c * 17) % 97) as f32 - 48.0);
    Arc::new(CorpusStore::from_parts(records, matrix).unwrap())
}

fn bench_rank_scan(c: &mut Criterion) {
    let ranker = Ranker::new(synthetic_corpus(), ZeroVectorPolicy::ScoreZero);
    let query: Vec<f32> = (0..DIMS).map(|i| (i % 13) as f32 - 6.0).collect();

    c.bench_function("rank_2000x384_top5", |b| {
        b.iter(|| ranker.rank(&query, 5).unwrap())
    });
}

fn bench_cached_search(c: &mut Criterion) {
    let encoder = Arc::new(QueryEncoder::new(Box::new(TfIdfFallback::new(DIMS)), 128));
    let service =
        SearchService::new(synthetic_corpus(), encoder, RetrievalConfig::default()).unwrap();

    // Prime the query cache.
    service.search("how do black holes form", 5).unwrap();

    c.bench_function("search_cached_query_top5", |b| {
        b.iter(|| service.search("how do black holes form", 5).unwrap())
    });
}

criterion_group!(benches, bench_rank_scan, bench_cached_search);
criterion_main!(benches);
