//! # querytube-observability
//!
//! Subscriber setup for the `tracing` spans and events emitted by the other
//! crates, plus a few named events for the binary's lifecycle.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, init_tracing_with_filter, LOG_ENV_VAR};
