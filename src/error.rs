//! Domain error types for flick
//!
//! The scroll engine and the media helpers deliberately expose no errors:
//! engine inputs are clamped and media fetches fail soft to fallback records.
//! The taxonomy below covers the host concerns that can actually fail,
//! loading documents and driving the terminal.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for flick
#[derive(Debug, Error)]
pub enum FlickError {
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors related to loading and preparing documents
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Document not found: {0}")]
    NotFound(PathBuf),

    #[error("Document is not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("Failed to read '{path}': {reason}")]
    ReadFailed { path: PathBuf, reason: String },
}

/// Result type alias for FlickError
pub type Result<T> = std::result::Result<T, FlickError>;

impl From<String> for FlickError {
    fn from(msg: String) -> Self {
        FlickError::Other(msg)
    }
}
