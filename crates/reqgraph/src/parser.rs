//! Dependency reference parsing.
//!
//! A requirement's dependency cell is free text. Two forms are recognised:
//!
//! - a range `RM-001..RM-009`, meaning every identifier from the first to the
//!   last inclusive, zero-padded to the width of the first number;
//! - anything else, scanned for every identifier-looking token in order.
//!
//! Range detection is anchored at the start of the text and wins: once a
//! range matches, the rest of the text is not scanned. Text that contains no
//! identifier parses to an empty list; parsing never fails.

use crate::config::ReqgraphConfig;
use crate::domain::RequirementId;
use crate::error::{Error, Result};
use regex::Regex;

/// Prefix pattern used when no literal prefix is configured.
const ANY_PREFIX: &str = "[A-Z][A-Z0-9_]*";

/// Placeholder values that mean "no dependencies".
const PLACEHOLDERS: [&str; 4] = ["-", "–", "—", "N/A"];

/// Parses raw dependency text into requirement identifiers.
#[derive(Debug, Clone)]
pub struct DependencyParser {
    range: Regex,
    identifier: Regex,
    max_range_expansion: usize,
}

impl DependencyParser {
    /// Create a parser.
    ///
    /// With `prefix` set, only identifiers with that literal prefix are
    /// recognised; otherwise any uppercase alphanumeric prefix is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the identifier pattern cannot be compiled.
    pub fn new(prefix: Option<&str>, max_range_expansion: usize) -> Result<Self> {
        let prefix = prefix.map_or_else(|| ANY_PREFIX.to_string(), regex::escape);

        let range = Regex::new(&format!(
            r"^\s*({prefix})-([0-9]+)\.\.(?:{prefix})-([0-9]+)"
        ))
        .map_err(|e| Error::Config(format!("invalid range pattern: {e}")))?;
        let identifier = Regex::new(&format!(r"\b{prefix}-[0-9]+"))
            .map_err(|e| Error::Config(format!("invalid identifier pattern: {e}")))?;

        Ok(Self {
            range,
            identifier,
            max_range_expansion,
        })
    }

    /// Create a parser from the session configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configured prefix yields an invalid pattern.
    pub fn from_config(config: &ReqgraphConfig) -> Result<Self> {
        Self::new(config.id_prefix.as_deref(), config.max_range_expansion)
    }

    /// Returns `true` if `raw` means "no dependencies" (blank or a placeholder).
    #[must_use]
    pub fn is_placeholder(raw: &str) -> bool {
        let trimmed = raw.trim();
        trimmed.is_empty() || PLACEHOLDERS.iter().any(|p| p.eq_ignore_ascii_case(trimmed))
    }

    /// Parse dependency text into identifiers.
    ///
    /// Scanned identifiers are returned in order of appearance, duplicates
    /// included. A range whose end is below its start expands to nothing.
    #[must_use]
    pub fn parse(&self, raw: &str) -> Vec<RequirementId> {
        if Self::is_placeholder(raw) {
            return Vec::new();
        }

        if let Some(expanded) = self.expand_range(raw) {
            return expanded;
        }

        self.identifier
            .find_iter(raw)
            .map(|m| RequirementId::new(m.as_str()))
            .collect()
    }

    /// Expand a leading range reference, if there is one.
    ///
    /// Returns `None` when the text does not start with a range or its bounds
    /// do not fit in a `u64`, in which case the caller falls back to scanning.
    fn expand_range(&self, raw: &str) -> Option<Vec<RequirementId>> {
        let captures = self.range.captures(raw)?;
        let prefix = captures.get(1)?.as_str();
        let start_digits = captures.get(2)?.as_str();
        let start: u64 = start_digits.parse().ok()?;
        let end: u64 = captures.get(3)?.as_str().parse().ok()?;
        let width = start_digits.len();

        if end < start || self.max_range_expansion == 0 {
            return Some(Vec::new());
        }

        let span = end - start;
        let limit = u64::try_from(self.max_range_expansion).unwrap_or(u64::MAX);
        let last = if span >= limit {
            tracing::warn!(
                range = raw.trim(),
                limit = self.max_range_expansion,
                "Range reference too long, truncating expansion"
            );
            start + limit - 1
        } else {
            end
        };

        Some(
            (start..=last)
                .map(|n| RequirementId::new(format!("{prefix}-{n:0width$}")))
                .collect(),
        )
    }
}
