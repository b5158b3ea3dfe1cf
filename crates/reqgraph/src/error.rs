//! Error types for reqgraph operations.
//!
//! Building and analysing a graph never fails because of bad rows: malformed
//! dependency text, dangling references and duplicate identifiers are
//! reported as [`BuildWarning`](crate::diagnostics::BuildWarning)s. The
//! errors here cover infrastructure failures and the one user-facing query
//! failure, [`Error::UnknownNode`].

use crate::domain::RequirementId;
use std::io;
use thiserror::Error;

/// The error type for reqgraph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A query addressed a requirement that is not in the graph.
    #[error("Unknown requirement: {0}")]
    UnknownNode(RequirementId),

    /// The requirement list could not be loaded.
    #[error("Load error: {0}")]
    Load(#[from] reqgraph_jsonl::Error),

    /// Internal invariant violated (e.g. a poisoned lock).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for reqgraph operations.
pub type Result<T> = std::result::Result<T, Error>;
