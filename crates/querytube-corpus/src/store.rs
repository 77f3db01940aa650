//! The immutable, aligned corpus.

use std::path::Path;

use ndarray::{Array2, ArrayView1, ArrayView2};
use querytube_core::config::CorpusConfig;
use querytube_core::errors::{CorpusError, QueryTubeResult};
use querytube_core::CorpusRecord;
use tracing::{info, info_span};

use crate::matrix;
use crate::records;

/// Records and their embedding rows, aligned by position.
///
/// Built once at startup; there are no mutation methods. Share it behind an
/// `Arc` to serve concurrent searches without locking.
#[derive(Debug)]
pub struct CorpusStore {
    records: Vec<CorpusRecord>,
    embeddings: Array2<f32>,
    fingerprint: String,
}

impl CorpusStore {
    /// Load the CSV records and the `.npy` matrix.
    ///
    /// Both files are checked for existence before either is parsed, so a
    /// missing asset is always reported as `AssetMissing`.
    ///
    /// # Errors
    /// `AssetMissing`, `MalformedRecords`, `MalformedEmbeddings`,
    /// `CorpusMisaligned`, `EmptyDimensions`.
    pub fn load(records_path: &Path, embeddings_path: &Path) -> QueryTubeResult<Self> {
        let _span = info_span!(
            "corpus_load",
            records = %records_path.display(),
            embeddings = %embeddings_path.display()
        )
        .entered();

        for path in [records_path, embeddings_path] {
            if !path.exists() {
                return Err(CorpusError::AssetMissing {
                    path: path.display().to_string(),
                }
                .into());
            }
        }

        let records = records::read_records(records_path)?;
        let embeddings = matrix::read_embeddings(embeddings_path)?;
        let store = Self::from_parts(records, embeddings)?;

        info!(
            records = store.len(),
            dims = store.dimensions(),
            fingerprint = %store.fingerprint(),
            "corpus loaded"
        );
        Ok(store)
    }

    /// Load from the paths in a [`CorpusConfig`].
    pub fn from_config(config: &CorpusConfig) -> QueryTubeResult<Self> {
        Self::load(
            Path::new(&config.records_path),
            Path::new(&config.embeddings_path),
        )
    }

    /// Build a store from in-memory parts, enforcing row alignment.
    ///
    /// # Errors
    /// `CorpusMisaligned` when the row counts differ, `EmptyDimensions` when
    /// a non-empty matrix has zero columns.
    pub fn from_parts(records: Vec<CorpusRecord>, embeddings: Array2<f32>) -> QueryTubeResult<Self> {
        if records.len() != embeddings.nrows() {
            return Err(CorpusError::CorpusMisaligned {
                records: records.len(),
                embeddings: embeddings.nrows(),
            }
            .into());
        }
        if embeddings.nrows() > 0 && embeddings.ncols() == 0 {
            return Err(CorpusError::EmptyDimensions {
                rows: embeddings.nrows(),
            }
            .into());
        }

        let embeddings = if embeddings.is_standard_layout() {
            embeddings
        } else {
            embeddings.as_standard_layout().into_owned()
        };
        let fingerprint = fingerprint(&records, &embeddings);

        Ok(Self {
            records,
            embeddings,
            fingerprint,
        })
    }

    /// Number of records (and embedding rows).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Embedding dimensionality D.
    pub fn dimensions(&self) -> usize {
        self.embeddings.ncols()
    }

    pub fn record(&self, index: usize) -> Option<&CorpusRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[CorpusRecord] {
        &self.records
    }

    /// Read-only view of the full matrix.
    pub fn embeddings(&self) -> ArrayView2<'_, f32> {
        self.embeddings.view()
    }

    /// Embedding row for record `index`.
    pub fn row(&self, index: usize) -> Option<ArrayView1<'_, f32>> {
        (index < self.len()).then(|| self.embeddings.row(index))
    }

    /// blake3 digest over records and embeddings, hex encoded.
    ///
    /// Two stores with the same fingerprint serve identical results.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn fingerprint(records: &[CorpusRecord], embeddings: &Array2<f32>) -> String {
    let mut hasher = blake3::Hasher::new();
    for r in records {
        for field in [&r.external_id, &r.title, &r.description] {
            hasher.update(&(field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }
        let date = r.published_date.map(|d| d.to_string()).unwrap_or_default();
        hasher.update(date.as_bytes());
    }
    hasher.update(&(embeddings.ncols() as u64).to_le_bytes());
    for v in embeddings.iter() {
        hasher.update(&v.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
