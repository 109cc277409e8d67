//! Error types for the Argent library.
//!
//! All errors are represented by the [`ArgentError`] enum. Two of its
//! variants, [`ArgentError::MissingAttribute`] and
//! [`ArgentError::TimestampParse`], describe problems with a single record;
//! the indexer recovers from them by skipping that record. Every other
//! variant is a collaborator failure (source, store, I/O) and aborts the pass.
//!
//! # Examples
//!
//! ```
//! use argent::error::{ArgentError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ArgentError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Argent operations.
#[derive(Error, Debug)]
pub enum ArgentError {
    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The accessor could not produce an (id, text) pair for a record.
    #[error("Specified attribute '{attribute}' not found in item {}", .id.as_deref().unwrap_or("<unknown>"))]
    MissingAttribute {
        /// Partial identity of the record, when the accessor got that far.
        id: Option<String>,
        /// The attribute that was missing.
        attribute: String,
    },

    /// A record's time field could not be parsed as a timestamp.
    #[error("Unparseable timestamp: {value:?}")]
    TimestampParse {
        /// The raw value that failed to parse.
        value: String,
    },

    /// Record source (query collaborator) errors
    #[error("Source error: {0}")]
    Source(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with ArgentError.
pub type Result<T> = std::result::Result<T, ArgentError>;

impl ArgentError {
    /// Create a new missing attribute error.
    pub fn missing_attribute<S: Into<String>>(id: Option<String>, attribute: S) -> Self {
        ArgentError::MissingAttribute {
            id,
            attribute: attribute.into(),
        }
    }

    /// Create a new timestamp parse error.
    pub fn timestamp_parse<S: Into<String>>(value: S) -> Self {
        ArgentError::TimestampParse {
            value: value.into(),
        }
    }

    /// Create a new source error.
    pub fn source<S: Into<String>>(msg: S) -> Self {
        ArgentError::Source(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        ArgentError::Storage(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        ArgentError::Analysis(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ArgentError::Config(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        ArgentError::InvalidOperation(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ArgentError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ArgentError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Whether the error concerns a single record and can be skipped.
    ///
    /// The indexer logs these and moves on to the next record; anything else
    /// is propagated to the caller.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            ArgentError::MissingAttribute { .. } | ArgentError::TimestampParse { .. }
        )
    }
}
