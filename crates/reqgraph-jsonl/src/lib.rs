//! Resilient JSON Lines loading for requirement lists.
//!
//! Each non-blank line of the input holds one JSON object. Lines that cannot
//! be decoded are skipped and reported as [`Warning`]s so that one bad row
//! never blocks the rest of the list.
//!
//! ```no_run
//! # async fn example() -> reqgraph_jsonl::Result<()> {
//! let (rows, warnings) =
//!     reqgraph_jsonl::read_jsonl_resilient::<serde_json::Value, _>("requirements.jsonl").await?;
//! for warning in &warnings {
//!     eprintln!("{warning}");
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod reader;
pub mod warning;

pub use error::{Error, Result};
pub use reader::JsonlReader;
pub use warning::Warning;

use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::fs::File;

/// Reads a whole JSONL file, skipping lines that cannot be decoded as `T`.
///
/// Returns the decoded records in file order together with one warning per
/// skipped line.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, or if it is not
/// UTF-8 text.
pub async fn read_jsonl_resilient<T, P>(path: P) -> Result<(Vec<T>, Vec<Warning>)>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).await?;
    let mut reader = JsonlReader::new(file);
    let (records, warnings) = reader.read_resilient().await?;

    tracing::debug!(
        path = %path.display(),
        records = records.len(),
        warnings = warnings.len(),
        "Loaded JSONL file"
    );

    Ok((records, warnings))
}
