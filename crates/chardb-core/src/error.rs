//! Error types for chardb-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in chardb-core
///
/// Individual database lines never produce an error; a line that does not
/// match the record grammar is skipped.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to fetch a remote text source
    #[error("failed to fetch '{url}': {message}")]
    Fetch { url: String, message: String },

    /// Every configured text source failed
    #[error("no text source could be loaded")]
    NoSource,

    /// Sort field name not recognised
    #[error("unknown sort field: {0}")]
    UnknownSortField(String),

    /// Export format not recognised
    #[error("unknown export format: {0}")]
    UnknownFormat(String),

    /// CSV writing error from the csv crate
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
