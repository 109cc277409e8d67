//! Command line argument parsing for the Argent CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Argent - incremental phonetic indexing of record feeds
#[derive(Parser, Debug, Clone)]
#[command(name = "argent")]
#[command(about = "Incremental phonetic (Double Metaphone) indexing of record feeds")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ArgentArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Indexer configuration file (JSON)
    #[arg(short, long, global = true, env = "ARGENT_CONFIG", value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ArgentArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run one indexing pass over a JSON Lines feed
    Index(IndexArgs),

    /// Look up records by how a word sounds
    Search(SearchArgs),

    /// Print the Double Metaphone codes of words
    Encode(EncodeArgs),

    /// Print the index words extracted from a text
    Filter(FilterArgs),

    /// Show index statistics
    Stats(StatsArgs),
}

/// Arguments for an indexing pass
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    /// Path to the store directory
    #[arg(value_name = "STORE_PATH")]
    pub store_path: PathBuf,

    /// JSON Lines file holding the records
    #[arg(value_name = "FEED_FILE")]
    pub feed: PathBuf,

    /// Index namespace
    #[arg(short, long)]
    pub key: String,

    /// Field holding the record timestamp
    #[arg(long, default_value = "created_time")]
    pub time_field: String,

    /// Field holding the record id
    #[arg(long, default_value = "id")]
    pub id_field: String,

    /// Field holding the text; repeat to give fallbacks
    #[arg(long = "text-field", default_value = "caption")]
    pub text_fields: Vec<String>,

    /// Persist the store after every write
    #[arg(long)]
    pub sync_writes: bool,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Path to the store directory
    #[arg(value_name = "STORE_PATH")]
    pub store_path: PathBuf,

    /// Query word, text or code
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Index namespace
    #[arg(short, long)]
    pub key: String,

    /// Maximum number of results to return
    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    /// How the query is read
    #[arg(short = 'm', long, default_value = "word")]
    pub mode: SearchMode,
}

/// Ways of reading a search query
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Encode the query as one word
    Word,
    /// Run the word filter over the query and search every word
    Text,
    /// Use the query as a phonetic code
    Code,
}

/// Arguments for encoding words
#[derive(Parser, Debug, Clone)]
pub struct EncodeArgs {
    /// Words to encode
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,
}

/// Arguments for running the word filter
#[derive(Parser, Debug, Clone)]
pub struct FilterArgs {
    /// Text to filter
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Also print the codes of every word
    #[arg(long)]
    pub codes: bool,
}

/// Arguments for showing statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Path to the store directory
    #[arg(value_name = "STORE_PATH")]
    pub store_path: PathBuf,

    /// Index namespace
    #[arg(short, long)]
    pub key: String,

    /// List every bucket with its size
    #[arg(long)]
    pub buckets: bool,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index_command() {
        let args = ArgentArgs::parse_from([
            "argent",
            "-vv",
            "index",
            "/tmp/store",
            "feed.jsonl",
            "--key",
            "photos",
            "--text-field",
            "caption",
            "--text-field",
            "label",
        ]);

        assert_eq!(args.verbosity(), 2);
        match args.command {
            Command::Index(index) => {
                assert_eq!(index.key, "photos");
                assert_eq!(index.time_field, "created_time");
                assert_eq!(index.text_fields, vec!["caption", "label"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        let args = ArgentArgs::parse_from(["argent", "-q", "-vvv", "encode", "Smith"]);
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_search_defaults() {
        let args = ArgentArgs::parse_from([
            "argent", "-f", "json", "search", "/tmp/store", "Smith", "-k", "people",
        ]);
        assert_eq!(args.output_format, OutputFormat::Json);
        match args.command {
            Command::Search(search) => {
                assert_eq!(search.limit, 10);
                assert_eq!(search.mode, SearchMode::Word);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
