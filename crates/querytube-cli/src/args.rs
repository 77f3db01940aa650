//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "querytube")]
#[command(version, about = "Semantic search over a fixed corpus of video metadata")]
pub struct Cli {
    /// TOML config file. Defaults apply when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// CSV records file (overrides corpus.records_path)
    #[arg(long, global = true)]
    pub records: Option<PathBuf>,

    /// `.npy` embedding matrix (overrides corpus.embeddings_path)
    #[arg(long, global = true)]
    pub embeddings: Option<PathBuf>,

    /// Embedding provider: onnx, fastembed, tfidf (overrides embedding.provider)
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// ONNX model file (overrides embedding.model_path)
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// `tokenizer.json` for the ONNX model (overrides embedding.tokenizer_path)
    #[arg(long, global = true)]
    pub tokenizer: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one query and print the top results
    Search {
        /// The search query
        query: String,

        /// Number of results (defaults to retrieval.default_top_k)
        #[arg(short, long)]
        k: Option<usize>,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read queries from stdin, one per line
    Repl {
        /// Number of results per query
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Embed every record and write the `.npy` matrix
    Prepare {
        /// Output path (defaults to corpus.embeddings_path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print corpus and provider details
    Inspect,
}
