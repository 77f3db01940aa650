//! # querytube-cli
//!
//! Terminal presenter for the search service. The binary in `main.rs` only
//! parses arguments and maps startup failures to an exit status.

pub mod app;
pub mod args;
pub mod commands;
pub mod render;
