//! Error types for docsplice.

use std::io;
use thiserror::Error;

/// Result type alias for docsplice operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading data or splicing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failure for documents, datasets or manifests.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A marker has no matching paragraph anywhere in the document.
    #[error("Marker '{0}' not found in document")]
    MarkerNotFound(String),

    /// Marker paragraphs were still present after a splice pass.
    #[error("Unresolved markers left in document: {}", .0.join(", "))]
    UnresolvedMarkers(Vec<String>),

    /// A marker location no longer addresses a container in the tree.
    #[error("Stale marker location: {0}")]
    StaleLocation(String),

    /// A dataset could not be read or decoded.
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// No loader is registered for the dataset source.
    #[error("Unsupported dataset source: {0}")]
    UnsupportedSource(String),

    /// The splice manifest is invalid.
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// A marker pattern failed to compile.
    #[error("Invalid marker pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

#[cfg(feature = "csv")]
impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        if !err.is_io_error() {
            return Error::Dataset(err.to_string());
        }
        match err.into_kind() {
            csv::ErrorKind::Io(e) => Error::Io(e),
            other => Error::Dataset(format!("{:?}", other)),
        }
    }
}
