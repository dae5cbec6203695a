use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Lexis - prefix autocomplete over a lexicographic sorted set
#[derive(Parser)]
#[command(name = "lexis", version, about)]
pub struct Cli {
    /// Path to a TOML config file.
    #[arg(long, env = "LEXIS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Corpus URL or file path, one word per line.
    #[arg(long)]
    pub corpus: Option<String>,

    /// Maximum entries per bulk insert.
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Abort the build on the first invalid word instead of skipping it.
    #[arg(long)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the index and print its statistics.
    Build,
    /// Build the index and complete each prefix.
    Query {
        /// Prefixes to complete.
        #[arg(required = true)]
        prefixes: Vec<String>,
        /// Maximum keys returned per prefix.
        #[arg(long)]
        limit: Option<usize>,
        /// Print only complete words, marker stripped.
        #[arg(long)]
        words: bool,
    },
    /// Build the index and time random prefix queries.
    Bench {
        /// Number of queries to issue.
        #[arg(long)]
        iterations: Option<usize>,
        /// Seed for the query sequence.
        #[arg(long)]
        seed: Option<u64>,
        /// Maximum keys returned per query.
        #[arg(long)]
        limit: Option<usize>,
    },
}
