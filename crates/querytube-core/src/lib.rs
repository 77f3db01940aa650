//! # querytube-core
//!
//! Foundation crate for QueryTube semantic search.
//! Defines the shared types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::QueryTubeConfig;
pub use errors::{QueryTubeError, QueryTubeResult};
pub use models::{CorpusRecord, RankedHit, RankedIndex, SearchOutcome};
pub use traits::IEmbeddingProvider;
