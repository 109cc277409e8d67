//! Command implementations for the Argent CLI.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::analysis::WordFilter;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{ArgentError, Result};
use crate::index::{IndexDescriptor, Indexer, IndexerConfig, PhoneticSearcher};
use crate::phonetic::{DoubleMetaphone, PhoneticEncoder};
use crate::record::FieldNames;
use crate::source::JsonlSource;
use crate::store::{IndexStore, StoreConfig, open_store};

/// Execute a CLI command.
pub fn execute_command(args: ArgentArgs) -> Result<()> {
    let config = load_config(&args)?;

    match &args.command {
        Command::Index(index_args) => run_index(index_args, &config, &args),
        Command::Search(search_args) => search_index(search_args, &config, &args),
        Command::Encode(encode_args) => encode_words(encode_args, &args),
        Command::Filter(filter_args) => filter_text(filter_args, &config, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &args),
    }
}

fn load_config(args: &ArgentArgs) -> Result<IndexerConfig> {
    match &args.config {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            IndexerConfig::from_file(path)
        }
        None => Ok(IndexerConfig::default()),
    }
}

/// Open the store, run `f`, and close the store whatever `f` returned.
fn with_store<T>(
    path: &Path,
    sync_writes: bool,
    f: impl FnOnce(&Arc<dyn IndexStore>) -> Result<T>,
) -> Result<T> {
    let store = open_store(&StoreConfig::file(path).with_sync_writes(sync_writes))?;
    let result = f(&store);
    let closed = store.close();
    let value = result?;
    closed?;
    Ok(value)
}

/// Run one indexing pass.
fn run_index(args: &IndexArgs, config: &IndexerConfig, cli_args: &ArgentArgs) -> Result<()> {
    let source = JsonlSource::new(&args.feed, &args.time_field);
    let descriptor = IndexDescriptor::new(&args.key, &args.time_field, source);

    let (first, fallbacks) = args
        .text_fields
        .split_first()
        .ok_or_else(|| ArgentError::invalid_argument("at least one --text-field is required"))?;
    let mut accessor = FieldNames::new(&args.id_field, first);
    for text_field in fallbacks {
        accessor = accessor.or_text_field(text_field);
    }

    let report = with_store(&args.store_path, args.sync_writes, |store| {
        let indexer = Indexer::with_config(descriptor, store.clone(), config)?;
        indexer.run_pass_report(&accessor)
    })?;

    output_result("Indexing pass complete", &report, cli_args)
}

/// Search an index.
fn search_index(args: &SearchArgs, config: &IndexerConfig, cli_args: &ArgentArgs) -> Result<()> {
    let start_time = Instant::now();

    let (codes, hits) = with_store(&args.store_path, false, |store| {
        let searcher = PhoneticSearcher::with_config(&args.key, store.clone(), config)?;
        let codes = match args.mode {
            SearchMode::Word => searcher.word_codes(&args.query),
            SearchMode::Text => searcher.text_codes(&args.query)?,
            SearchMode::Code => vec![args.query.to_ascii_uppercase()],
        };
        let hits = searcher.search_codes(&codes, args.limit)?;
        Ok((codes, hits))
    })?;

    let results = SearchResults {
        key: args.key.clone(),
        query: args.query.clone(),
        codes,
        hits,
        duration_ms: start_time.elapsed().as_millis() as u64,
    };

    output_result("Search complete", &results, cli_args)
}

fn encode(encoder: &DoubleMetaphone, word: &str) -> EncodedWord {
    let codes = encoder.encode(word);
    EncodedWord {
        word: word.to_string(),
        primary: codes.primary,
        secondary: codes.secondary,
    }
}

/// Print the codes of each word.
fn encode_words(args: &EncodeArgs, cli_args: &ArgentArgs) -> Result<()> {
    let encoder = DoubleMetaphone::new();
    let encoded: Vec<EncodedWord> = args.words.iter().map(|w| encode(&encoder, w)).collect();

    output_result("Encoded words", &encoded, cli_args)
}

/// Print the index words of a text.
fn filter_text(args: &FilterArgs, config: &IndexerConfig, cli_args: &ArgentArgs) -> Result<()> {
    let filter = WordFilter::with_config(config.word_filter.clone())?;
    let words = filter.filter(&args.text)?;

    let codes = args.codes.then(|| {
        let encoder = DoubleMetaphone::new();
        words.iter().map(|w| encode(&encoder, w)).collect()
    });

    let result = FilterResult {
        text: args.text.clone(),
        words,
        codes,
    };

    output_result("Filtered text", &result, cli_args)
}

/// Show statistics for one namespace.
fn show_stats(args: &StatsArgs, cli_args: &ArgentArgs) -> Result<()> {
    let stats = with_store(&args.store_path, false, |store| {
        let cursor = store.get_cursor(&args.key)?;

        let mut buckets = Vec::new();
        for code in store.codes(&args.key)? {
            let entries = store.bucket_len(&args.key, &code)?;
            buckets.push(BucketStats { code, entries });
        }

        Ok(IndexStats {
            key: args.key.clone(),
            cursor,
            total_buckets: buckets.len(),
            total_entries: buckets.iter().map(|b| b.entries).sum(),
            buckets: args.buckets.then_some(buckets),
        })
    })?;

    output_result("Index statistics", &stats, cli_args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, InvertedIndexStore};
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_index_command_writes_store() {
        let temp_dir = TempDir::new().unwrap();
        let feed = temp_dir.path().join("feed.jsonl");
        fs::write(
            &feed,
            "{\"id\": \"a\", \"created_time\": \"2020-01-02\", \"caption\": \"Bright Sunset.jpg\"}\n",
        )
        .unwrap();
        let store_path = temp_dir.path().join("store");

        let args = ArgentArgs::parse_from([
            "argent".to_string(),
            "-q".to_string(),
            "index".to_string(),
            store_path.display().to_string(),
            feed.display().to_string(),
            "--key".to_string(),
            "photos".to_string(),
        ]);
        execute_command(args).unwrap();

        let store = FileStore::open(&store_path).unwrap();
        assert_eq!(store.score("photos", "PRT", "a").unwrap(), Some(1577923200));
    }

    #[test]
    fn test_search_command_modes() {
        let temp_dir = TempDir::new().unwrap();
        let feed = temp_dir.path().join("feed.jsonl");
        fs::write(
            &feed,
            "{\"id\": \"a\", \"created_time\": \"2020-01-02\", \"caption\": \"Bright Sunset.jpg\"}\n",
        )
        .unwrap();
        let store_path = temp_dir.path().join("store");
        let store_arg = store_path.display().to_string();

        let run = |extra: &[&str]| {
            let argv = ["argent", "-q", "--format", "json"]
                .iter()
                .chain(extra)
                .map(|a| a.to_string());
            execute_command(ArgentArgs::parse_from(argv))
        };

        let feed_arg = feed.display().to_string();
        run(&["index", &store_arg, &feed_arg, "--key", "photos"]).unwrap();
        run(&["search", &store_arg, "Brite", "--key", "photos"]).unwrap();
        run(&["search", &store_arg, "Sunset at dusk", "--key", "photos", "--mode", "text"]).unwrap();
        run(&["search", &store_arg, "snst", "--key", "photos", "--mode", "code"]).unwrap();

        // Every command released the store.
        assert!(FileStore::open(&store_path).is_ok());
    }

    #[test]
    fn test_with_store_closes_on_error() {
        let temp_dir = TempDir::new().unwrap();
        let result: Result<()> = with_store(temp_dir.path(), false, |_| {
            Err(ArgentError::other("boom"))
        });
        assert!(result.is_err());
        // The lock was released, so the store opens again.
        assert!(FileStore::open(temp_dir.path()).is_ok());
    }
}
