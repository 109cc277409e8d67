//! Output formatting for CLI commands.

use chrono::{TimeZone, Utc};
use serde::Serialize;

use crate::cli::args::{ArgentArgs, OutputFormat};
use crate::error::Result;
use crate::index::{Hit, PassReport};

/// Result structure for search operations.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub key: String,
    pub query: String,
    pub codes: Vec<String>,
    pub hits: Vec<Hit>,
    pub duration_ms: u64,
}

/// Codes of one encoded word.
#[derive(Debug, Serialize)]
pub struct EncodedWord {
    pub word: String,
    pub primary: String,
    pub secondary: Option<String>,
}

/// Result structure for the word filter.
#[derive(Debug, Serialize)]
pub struct FilterResult {
    pub text: String,
    pub words: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codes: Option<Vec<EncodedWord>>,
}

/// Index statistics.
#[derive(Debug, Serialize)]
pub struct IndexStats {
    pub key: String,
    pub cursor: Option<String>,
    pub total_buckets: usize,
    pub total_entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buckets: Option<Vec<BucketStats>>,
}

/// Size of one bucket.
#[derive(Debug, Serialize)]
pub struct BucketStats {
    pub code: String,
    pub entries: usize,
}

/// Results that know how to print themselves for people.
pub trait HumanOutput {
    fn print_human(&self, args: &ArgentArgs);
}

/// Output a result in the format selected on the command line.
pub fn output_result<T>(message: &str, result: &T, args: &ArgentArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human(args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &ArgentArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

impl HumanOutput for PassReport {
    fn print_human(&self, args: &ArgentArgs) {
        if !self.updated {
            println!("No new records for {} (cursor {})", self.key, self.cursor);
            return;
        }

        println!("Indexed {}:", self.key);
        println!("  records fetched:  {}", self.fetched);
        println!("  records indexed:  {}", self.indexed);
        println!("  records skipped:  {}", self.skipped);
        println!("  entries written:  {}", self.entries_written);
        if args.verbosity() > 1 {
            println!("  previous cursor:  {}", self.previous_cursor);
        }
        println!("  cursor:           {}", self.cursor);
    }
}

impl HumanOutput for SearchResults {
    fn print_human(&self, args: &ArgentArgs) {
        if args.verbosity() > 0 {
            println!(
                "{} result(s) for {:?} in {} [{}]",
                self.hits.len(),
                self.query,
                self.key,
                self.codes.join(", ")
            );
        }

        for (i, hit) in self.hits.iter().enumerate() {
            println!("{:>3}. {}  ({})", i + 1, hit.id, format_score(hit.score));
        }

        if args.verbosity() > 1 {
            println!();
            println!("Search took {}ms", self.duration_ms);
        }
    }
}

impl HumanOutput for Vec<EncodedWord> {
    fn print_human(&self, _args: &ArgentArgs) {
        for encoded in self {
            println!("{}", format_encoded(encoded));
        }
    }
}

impl HumanOutput for FilterResult {
    fn print_human(&self, _args: &ArgentArgs) {
        match &self.codes {
            Some(codes) => {
                for encoded in codes {
                    println!("{}", format_encoded(encoded));
                }
            }
            None => {
                for word in &self.words {
                    println!("{word}");
                }
            }
        }
    }
}

impl HumanOutput for IndexStats {
    fn print_human(&self, _args: &ArgentArgs) {
        println!("Index Statistics: {}", self.key);
        println!("════════════════");
        println!("Cursor: {}", self.cursor.as_deref().unwrap_or("(none)"));
        println!("Buckets: {}", self.total_buckets);
        println!("Entries: {}", self.total_entries);

        if let Some(buckets) = &self.buckets {
            println!();
            for bucket in buckets {
                println!("{:<6} {}", bucket.code, bucket.entries);
            }
        }
    }
}

fn format_encoded(encoded: &EncodedWord) -> String {
    match &encoded.secondary {
        Some(secondary) => format!("{}\t{}\t{}", encoded.word, encoded.primary, secondary),
        None => format!("{}\t{}", encoded.word, encoded.primary),
    }
}

/// Render a score (unix seconds) as a UTC date-time.
pub fn format_score(score: i64) -> String {
    match Utc.timestamp_opt(score, 0).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => score.to_string(),
    }
}
