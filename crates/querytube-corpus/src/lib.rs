//! # querytube-corpus
//!
//! Loads the fixed search corpus once at startup and exposes it read-only.
//!
//! Two artifacts make up a corpus:
//! - a CSV file with one row per video (`video_id`, `title`, `description`,
//!   `published_date`),
//! - a 2-D `.npy` matrix with one embedding row per CSV row.
//!
//! Row `i` of the matrix belongs to record `i`. A count mismatch is a fatal
//! load error.

pub mod matrix;
pub mod prepare;
pub mod records;
pub mod store;

pub use matrix::{read_embeddings, write_embeddings};
pub use prepare::embed_records;
pub use records::{parse_published_date, read_records};
pub use store::CorpusStore;
