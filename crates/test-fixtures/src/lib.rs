//! Fixture corpora and fake embedding providers for QueryTube tests.
//!
//! Corpora are written to a temporary directory as the same CSV + `.npy`
//! pair the application loads in production. The directory is removed when
//! the [`FixtureCorpus`] is dropped.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use ndarray::Array2;
use querytube_core::errors::{EmbeddingError, QueryTubeResult};
use querytube_core::{CorpusRecord, IEmbeddingProvider};
use tempfile::TempDir;

/// CSV header written by the fixture builders.
pub const RECORDS_HEADER: [&str; 4] = ["video_id", "title", "description", "published_date"];

/// A corpus written to disk for a single test.
pub struct FixtureCorpus {
    dir: TempDir,
    pub records_path: PathBuf,
    pub embeddings_path: PathBuf,
}

impl FixtureCorpus {
    /// Write `records` as CSV and `embeddings` as a `(rows, dims)` f32 matrix.
    ///
    /// `dims` is only needed to shape an empty matrix.
    ///
    /// # Panics
    /// Panics if the files cannot be written or rows have uneven lengths.
    pub fn write(records: &[CorpusRecord], embeddings: &[Vec<f32>], dims: usize) -> Self {
        let dir = tempfile::tempdir().expect("create fixture dir");
        let records_path = dir.path().join("app_data.csv");
        let embeddings_path = dir.path().join("app_embeddings.npy");
        write_records_csv(&records_path, records);
        write_npy_f32(&embeddings_path, embeddings, dims);
        Self {
            dir,
            records_path,
            embeddings_path,
        }
    }

    /// Write raw CSV text alongside an f32 matrix.
    pub fn write_raw(csv_text: &str, embeddings: &[Vec<f32>], dims: usize) -> Self {
        let dir = tempfile::tempdir().expect("create fixture dir");
        let records_path = dir.path().join("app_data.csv");
        let embeddings_path = dir.path().join("app_embeddings.npy");
        std::fs::write(&records_path, csv_text).expect("write raw csv");
        write_npy_f32(&embeddings_path, embeddings, dims);
        Self {
            dir,
            records_path,
            embeddings_path,
        }
    }

    /// The temporary directory holding the fixture files.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Write records in the column layout the loader expects.
pub fn write_records_csv(path: &Path, records: &[CorpusRecord]) {
    let mut writer = csv::Writer::from_path(path).expect("open csv for writing");
    writer.write_record(RECORDS_HEADER).expect("write header");
    for r in records {
        let date = r
            .published_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        writer
            .write_record([
                r.external_id.as_str(),
                r.title.as_str(),
                r.description.as_str(),
                date.as_str(),
            ])
            .expect("write record");
    }
    writer.flush().expect("flush csv");
}

/// Write rows as a 2-D f32 `.npy` file.
pub fn write_npy_f32(path: &Path, rows: &[Vec<f32>], dims: usize) {
    let dims = rows.first().map(Vec::len).unwrap_or(dims);
    let flat: Vec<f32> = rows.iter().flatten().copied().collect();
    let matrix = Array2::from_shape_vec((rows.len(), dims), flat).expect("rectangular rows");
    ndarray_npy::write_npy(path, &matrix).expect("write npy");
}

/// Write rows as a 2-D f64 `.npy` file.
pub fn write_npy_f64(path: &Path, rows: &[Vec<f64>]) {
    let dims = rows.first().map(Vec::len).unwrap_or(0);
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    let matrix = Array2::from_shape_vec((rows.len(), dims), flat).expect("rectangular rows");
    ndarray_npy::write_npy(path, &matrix).expect("write npy");
}

/// `n` distinct records with predictable ids and titles.
pub fn sample_records(n: usize) -> Vec<CorpusRecord> {
    (0..n)
        .map(|i| {
            CorpusRecord::new(
                format!("vid{i:03}"),
                format!("Video {i}"),
                format!("Description of video number {i}"),
                NaiveDate::from_ymd_opt(2020, 1, 1 + (i % 28) as u32),
            )
        })
        .collect()
}

/// The three-item corpus used throughout the ranking tests.
///
/// Rows point along the x, y and z axes, so a query near `[0, 1, 0]` is
/// closest to item 1 ("the second item").
pub fn three_item_corpus() -> (Vec<CorpusRecord>, Vec<Vec<f32>>) {
    let records = vec![
        CorpusRecord::new(
            "aaa",
            "The Fermi Paradox",
            "Where are all the aliens?",
            NaiveDate::from_ymd_opt(2015, 6, 10),
        ),
        CorpusRecord::new(
            "bbb",
            "Could We Live on Mars?",
            "Colonising the red planet.",
            NaiveDate::from_ymd_opt(2018, 2, 3),
        ),
        CorpusRecord::new(
            "ccc",
            "The Science of Aging",
            "Why do we get old?",
            None,
        ),
    ];
    let embeddings = vec![
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
    ];
    (records, embeddings)
}

/// Provider that returns fixed vectors for known texts.
///
/// Unknown texts get a deterministic vector derived from their bytes, so
/// every input still has a stable embedding.
pub struct FixedProvider {
    table: HashMap<String, Vec<f32>>,
    dimensions: usize,
}

impl FixedProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            table: HashMap::new(),
            dimensions,
        }
    }

    pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        assert_eq!(vector.len(), self.dimensions, "fixture vector has wrong dims");
        self.table.insert(text.to_string(), vector);
        self
    }

    fn derived(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dimensions];
        for (i, b) in text.bytes().enumerate() {
            v[i % self.dimensions] += f32::from(b) / 255.0;
        }
        if v.iter().all(|x| *x == 0.0) {
            v[0] = 1.0;
        }
        v
    }
}

impl IEmbeddingProvider for FixedProvider {
    fn embed(&self, text: &str) -> QueryTubeResult<Vec<f32>> {
        Ok(self
            .table
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.derived(text)))
    }

    fn embed_batch(&self, texts: &[String]) -> QueryTubeResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "fixed-fixture"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Wraps a provider and counts calls to `embed`.
pub struct CountingProvider {
    inner: Box<dyn IEmbeddingProvider>,
    calls: Arc<AtomicUsize>,
}

impl CountingProvider {
    pub fn new(inner: Box<dyn IEmbeddingProvider>) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared handle to the call counter. Stays valid after the provider is
    /// moved into an encoder.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl IEmbeddingProvider for CountingProvider {
    fn embed(&self, text: &str) -> QueryTubeResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.embed(text)
    }

    fn embed_batch(&self, texts: &[String]) -> QueryTubeResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(texts.len(), Ordering::SeqCst);
        self.inner.embed_batch(texts)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        "counting-fixture"
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }
}

/// Provider whose inference always fails.
pub struct FailingProvider {
    pub dimensions: usize,
}

impl IEmbeddingProvider for FailingProvider {
    fn embed(&self, _text: &str) -> QueryTubeResult<Vec<f32>> {
        Err(EmbeddingError::InferenceFailed {
            reason: "mock failure".to_string(),
        }
        .into())
    }

    fn embed_batch(&self, _texts: &[String]) -> QueryTubeResult<Vec<Vec<f32>>> {
        Err(EmbeddingError::InferenceFailed {
            reason: "mock failure".to_string(),
        }
        .into())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "failing-fixture"
    }

    fn is_available(&self) -> bool {
        true
    }
}
