//! # querytube-retrieval
//!
//! Exhaustive cosine-similarity search over the corpus matrix.
//!
//! ## Architecture
//!
//! ```text
//! SearchService
//! ├── QueryEncoder (querytube-embeddings, LRU-cached)
//! └── Ranker
//!     ├── CorpusStore (querytube-corpus, shared via Arc)
//!     ├── precomputed row norms
//!     └── stable top-k selection
//! ```
//!
//! Every query scans all N rows: O(N·D). There is no approximate index.

pub mod ranker;
pub mod service;
pub mod similarity;

pub use ranker::Ranker;
pub use service::SearchService;
pub use similarity::cosine_similarity;
