//! Error types for the bulk tooling.
//!
//! Only orchestration failures (reading input, writing output, bad settings)
//! surface here. Per-item API failures are recorded as
//! [`DeleteOutcome`](crate::outcome::DeleteOutcome) values instead.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// File could not be opened, read or written
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of a JSONL file is not valid JSON
    #[error("Invalid JSON on line {line} of '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A line parsed but is not a JSON object
    #[error("Line {line} of '{}' is not a JSON object", .path.display())]
    NotAnObject { path: PathBuf, line: usize },

    /// The `id` field holds something that cannot name a record
    #[error("Unsupported identifier {value} on line {line} of '{}'", .path.display())]
    UnsupportedId {
        path: PathBuf,
        line: usize,
        value: String,
    },

    /// Settings failed validation
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Record could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
