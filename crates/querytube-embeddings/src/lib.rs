//! # querytube-embeddings
//!
//! Maps query text into the corpus's embedding space.
//!
//! ## Architecture
//!
//! ```text
//! QueryEncoder
//! ├── IEmbeddingProvider (one, chosen by config)
//! │   ├── OnnxProvider (ONNX Runtime, local model file)
//! │   ├── FastEmbedProvider (feature "fastembed")
//! │   └── TfIdfFallback (hashed TF, no model files)
//! └── QueryCache (moka, LRU, keyed by exact query text)
//! ```

pub mod cache;
pub mod encoder;
pub mod providers;
pub mod vector;

pub use cache::{CacheStats, QueryCache};
pub use encoder::QueryEncoder;
pub use providers::{create_provider, OnnxProvider, TfIdfFallback};

#[cfg(feature = "fastembed")]
pub use providers::FastEmbedProvider;
