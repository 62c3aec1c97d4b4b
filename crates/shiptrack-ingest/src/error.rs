//! Error types for loading tracking exports.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a tracking export.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Export file not found.
    #[error("export file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The top-level value is not an array of shipments.
    #[error("expected a JSON array of shipments in {path}, found {found}")]
    NotAnArray { path: PathBuf, found: &'static str },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
