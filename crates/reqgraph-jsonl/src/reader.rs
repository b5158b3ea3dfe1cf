//! JSONL reading operations.
//!
//! This module provides async, line-by-line reading of JSONL data with line
//! number tracking, plus resilient decoding that skips bad lines instead of
//! aborting the whole load.

use crate::error::{Error, Result};
use crate::warning::Warning;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use std::io;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Byte order mark some spreadsheet exporters put at the start of a file.
const UTF8_BOM: char = '\u{feff}';

/// Async reader for JSONL (JSON Lines) data.
///
/// `JsonlReader` wraps an async reader and reads it one line at a time,
/// tracking the 1-based number of the last line read so that warnings can
/// point at the offending row.
///
/// # Examples
///
/// ```no_run
/// use reqgraph_jsonl::reader::JsonlReader;
/// use tokio::fs::File;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::open("requirements.jsonl").await?;
/// let mut reader = JsonlReader::new(file);
/// let (records, warnings) = reader.read_resilient::<serde_json::Value>().await?;
/// # Ok(())
/// # }
/// ```
pub struct JsonlReader<R> {
    /// Buffered reader wrapping the underlying async reader.
    reader: BufReader<R>,
    /// Number of the last line read (0 before any line is read).
    line_number: usize,
}

impl<R: AsyncRead + Unpin> JsonlReader<R> {
    /// Creates a new `JsonlReader` wrapping the given async reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
        }
    }

    /// Returns the number of the last line read.
    ///
    /// Returns 0 before any lines have been read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next line without its line terminator.
    ///
    /// Returns `Ok(None)` at end of input. A UTF-8 byte order mark at the
    /// start of the first line is removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the line is not valid UTF-8 and
    /// [`Error::Io`] for any other read failure.
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        let mut buffer = String::new();
        let read = self
            .reader
            .read_line(&mut buffer)
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::InvalidData => Error::InvalidFormat(format!(
                    "line {} is not valid UTF-8",
                    self.line_number + 1
                )),
                _ => Error::Io(e),
            })?;

        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let mut line = buffer.trim_end_matches(['\n', '\r']);
        if self.line_number == 1 {
            line = line.strip_prefix(UTF8_BOM).unwrap_or(line);
        }
        Ok(Some(line.to_string()))
    }

    /// Decodes every remaining line as a `T`, skipping lines that fail.
    ///
    /// Blank lines are ignored. Lines with invalid JSON syntax produce
    /// [`Warning::MalformedJson`]; lines with valid JSON of the wrong shape
    /// produce [`Warning::SkippedLine`].
    ///
    /// # Errors
    ///
    /// Only I/O and encoding failures are returned as errors.
    pub async fn read_resilient<T: DeserializeOwned>(&mut self) -> Result<(Vec<T>, Vec<Warning>)> {
        let mut records = Vec::new();
        let mut warnings = Vec::new();

        while let Some(line) = self.read_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<T>(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    let line_number = self.line_number;
                    tracing::debug!(line_number, error = %e, "Skipping unreadable JSONL line");
                    let warning = match e.classify() {
                        Category::Data => Warning::SkippedLine {
                            line_number,
                            reason: e.to_string(),
                        },
                        Category::Syntax | Category::Eof | Category::Io => {
                            Warning::MalformedJson {
                                line_number,
                                error: e.to_string(),
                            }
                        }
                    };
                    warnings.push(warning);
                }
            }
        }

        Ok((records, warnings))
    }
}
