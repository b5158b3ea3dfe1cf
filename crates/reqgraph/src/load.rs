//! Loading requirement records from a JSON Lines file.

use crate::domain::RequirementRecord;
use crate::error::Result;
use reqgraph_jsonl::Warning;
use std::path::Path;

/// Read every decodable record from `path`.
///
/// Lines that are not valid JSON, or not a requirement object, are skipped
/// and returned as warnings.
///
/// # Errors
///
/// Returns [`Error::Load`](crate::error::Error::Load) if the file cannot be
/// opened or is not UTF-8 text.
pub async fn load_records(path: impl AsRef<Path>) -> Result<(Vec<RequirementRecord>, Vec<Warning>)> {
    let path = path.as_ref();
    let (records, warnings) = reqgraph_jsonl::read_jsonl_resilient(path).await?;
    for warning in &warnings {
        tracing::warn!(path = %path.display(), "{warning}");
    }
    Ok((records, warnings))
}
