//! Warning types for non-fatal problems during JSONL loading.
//!
//! A requirement list is usually exported by hand from a spreadsheet, so a
//! single bad row should not prevent the rest of the list from loading. Lines
//! that cannot be turned into a record are skipped and described by a
//! [`Warning`].
//!
//! # Examples
//!
//! ```
//! use reqgraph_jsonl::Warning;
//!
//! let warning = Warning::MalformedJson {
//!     line_number: 5,
//!     error: "unexpected end of input".to_string(),
//! };
//! assert_eq!(warning.line_number(), 5);
//! assert_eq!(warning.kind(), "malformed_json");
//! ```

/// A non-fatal warning that occurred during JSONL loading.
///
/// Each variant carries the 1-based line number where the problem occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A line contained text that is not valid JSON.
    ///
    /// The line is skipped and loading continues with the next line.
    MalformedJson {
        /// The 1-based line number where the error occurred.
        line_number: usize,
        /// A description of the JSON syntax error.
        error: String,
    },

    /// A line held valid JSON that does not describe a record.
    ///
    /// Typical causes are a missing required field or a value of the wrong
    /// type (for example a number where a string is expected).
    SkippedLine {
        /// The 1-based line number that was skipped.
        line_number: usize,
        /// The reason the line was skipped.
        reason: String,
    },
}

impl Warning {
    /// Returns the line number associated with this warning.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedJson { line_number, .. } | Self::SkippedLine { line_number, .. } => {
                *line_number
            }
        }
    }

    /// Returns a human-readable description of the warning.
    ///
    /// # Examples
    ///
    /// ```
    /// use reqgraph_jsonl::Warning;
    ///
    /// let warning = Warning::SkippedLine {
    ///     line_number: 7,
    ///     reason: "missing field `id`".to_string(),
    /// };
    /// let desc = warning.description();
    /// assert!(desc.contains("line 7"));
    /// assert!(desc.contains("missing field"));
    /// ```
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::MalformedJson { line_number, error } => {
                format!("line {line_number}: malformed JSON: {error}")
            }
            Self::SkippedLine {
                line_number,
                reason,
            } => {
                format!("line {line_number}: skipped: {reason}")
            }
        }
    }

    /// Returns a static string identifying the warning kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedJson { .. } => "malformed_json",
            Self::SkippedLine { .. } => "skipped_line",
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::error::Error for Warning {}
