//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate Python TypedDict models from a document store
#[derive(Parser, Debug)]
#[command(name = "mongodb-typegen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory of collection exports (.json / .jsonl / .ndjson)
    #[arg(short = 'S', long, global = true)]
    pub source: Option<PathBuf>,

    /// Field always typed as ObjectId
    #[arg(long, global = true)]
    pub id_field: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate TypedDict models from collections
    Generate {
        /// Output file path for generated models
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Number of documents to sample per collection
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=10_000))]
        sample_size: Option<u64>,

        /// Comma-separated list of collections to process (default: all)
        #[arg(short, long, value_delimiter = ',')]
        collections: Vec<String>,

        /// Comma-separated list of collections to exclude
        #[arg(short, long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// Print the generated code instead of writing it
        #[arg(long)]
        dry_run: bool,

        /// Overwrite the output file if it exists
        #[arg(long)]
        force: bool,

        /// Enable verbose output
        #[arg(short, long, conflicts_with = "quiet")]
        verbose: bool,

        /// Suppress all output except errors
        #[arg(short, long)]
        quiet: bool,
    },

    /// List all collections in the source
    ListCollections,

    /// Preview the inferred schema and TypedDict for a single collection
    Preview {
        /// Collection to inspect
        collection: String,

        /// Number of documents to sample
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=1_000))]
        sample_size: Option<u64>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        format: OutputFormat,
    },
}

impl Cli {
    /// Default log level for this invocation
    pub fn log_level(&self) -> tracing::Level {
        match &self.command {
            Commands::Generate { quiet: true, .. } => tracing::Level::WARN,
            Commands::Generate { verbose: true, .. } => tracing::Level::DEBUG,
            _ => tracing::Level::INFO,
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Pretty,
    /// JSON output
    Json,
}
