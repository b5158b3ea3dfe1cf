//! Error types for reqgraph-jsonl operations.

use std::io;
use thiserror::Error;

/// The error type for reqgraph-jsonl operations.
///
/// Only failures that stop a load entirely are errors. Problems confined to a
/// single line are reported as [`Warning`](crate::Warning)s instead.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid JSONL format (e.g. the input is not UTF-8 text).
    #[error("Invalid JSONL format: {0}")]
    InvalidFormat(String),
}

/// A specialized Result type for reqgraph-jsonl operations.
pub type Result<T> = std::result::Result<T, Error>;
