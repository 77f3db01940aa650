use serde::{Deserialize, Serialize};

use super::CorpusRecord;

/// A corpus row index paired with its similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedIndex {
    pub index: usize,
    /// Cosine similarity in [-1.0, 1.0].
    pub score: f32,
}

/// A ranked index resolved to its corpus record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedHit {
    pub index: usize,
    pub score: f32,
    pub record: CorpusRecord,
}
