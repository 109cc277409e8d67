//! JSON Lines record source.
//!
//! Reads a feed file where each line is one JSON object:
//! ```jsonl
//! {"id": "a", "created_time": "2020-01-02", "caption": "Bright Sunset.jpg"}
//! {"id": "b", "created_time": "2020-01-03", "caption": "Harbour at dusk"}
//! ```
//!
//! The file is re-read on every fetch, so appending lines to it between
//! passes behaves like a growing table.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{ArgentError, Result};
use crate::source::{RecordSource, select_newer};

/// A record source over a JSON Lines file.
#[derive(Clone, Debug)]
pub struct JsonlSource {
    path: PathBuf,
    time_field: String,
}

impl JsonlSource {
    pub fn new<P: AsRef<Path>, S: Into<String>>(path: P, time_field: S) -> Self {
        JsonlSource {
            path: path.as_ref().to_path_buf(),
            time_field: time_field.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record in the file, in file order.
    pub fn read_all(&self) -> Result<Vec<Value>> {
        let file = File::open(&self.path).map_err(|e| {
            ArgentError::source(format!("Failed to open {}: {e}", self.path.display()))
        })?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let value: Value = serde_json::from_str(&line).map_err(|e| {
                ArgentError::source(format!(
                    "{}: line {}: {e}",
                    self.path.display(),
                    line_num + 1
                ))
            })?;
            records.push(value);
        }

        Ok(records)
    }
}

impl RecordSource for JsonlSource {
    type Record = Value;

    fn fetch_since(&self, since: DateTime<Utc>) -> Result<Vec<Value>> {
        let records = self.read_all()?;
        Ok(select_newer(records, &self.time_field, since))
    }
}
