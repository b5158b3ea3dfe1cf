//! Data-quality diagnostics collected while building a graph.
//!
//! The builder tolerates unknown references, duplicate identifiers and
//! unparseable dependency text; none of them stops a build. Each occurrence
//! is recorded as a [`BuildWarning`] so the tolerance stays observable.

use crate::domain::RequirementId;
use serde::Serialize;
use std::fmt;

/// A non-fatal anomaly found while building the requirement graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildWarning {
    /// A dependency names an identifier that is not in the list.
    ///
    /// **Effect**: no edge is created for this reference.
    UnknownReference {
        /// The requirement whose dependency text holds the reference
        requirement: RequirementId,
        /// The identifier that could not be found
        reference: RequirementId,
    },

    /// A record reuses an identifier already seen.
    ///
    /// **Effect**: the later record's attributes replace the earlier ones;
    /// dependency edges from both records are kept.
    DuplicateIdentifier {
        /// The repeated identifier
        requirement: RequirementId,
        /// 1-based position of the overriding record in the input
        record_number: usize,
    },

    /// A requirement lists itself as a dependency.
    ///
    /// **Effect**: a self-loop edge is created and the node lies on a cycle.
    SelfDependency {
        /// The self-referencing requirement
        requirement: RequirementId,
    },

    /// Dependency text is neither blank nor a placeholder but names no identifier.
    ///
    /// **Effect**: the requirement gets no dependency edges from this text.
    UnrecognizedDependencyText {
        /// The requirement carrying the text
        requirement: RequirementId,
        /// The raw text
        text: String,
    },

    /// A record has a blank identifier.
    ///
    /// **Effect**: the record is skipped.
    EmptyIdentifier {
        /// 1-based position of the record in the input
        record_number: usize,
    },
}

impl BuildWarning {
    /// Returns the requirement this warning is about, if any.
    #[must_use]
    pub fn requirement(&self) -> Option<&RequirementId> {
        match self {
            Self::UnknownReference { requirement, .. }
            | Self::DuplicateIdentifier { requirement, .. }
            | Self::SelfDependency { requirement }
            | Self::UnrecognizedDependencyText { requirement, .. } => Some(requirement),
            Self::EmptyIdentifier { .. } => None,
        }
    }

    /// Returns a static string identifying the warning kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownReference { .. } => "unknown_reference",
            Self::DuplicateIdentifier { .. } => "duplicate_identifier",
            Self::SelfDependency { .. } => "self_dependency",
            Self::UnrecognizedDependencyText { .. } => "unrecognized_dependency_text",
            Self::EmptyIdentifier { .. } => "empty_identifier",
        }
    }
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownReference {
                requirement,
                reference,
            } => write!(f, "{requirement}: depends on unknown requirement {reference}"),
            Self::DuplicateIdentifier {
                requirement,
                record_number,
            } => write!(
                f,
                "{requirement}: duplicate identifier at record {record_number} replaces earlier attributes"
            ),
            Self::SelfDependency { requirement } => {
                write!(f, "{requirement}: depends on itself")
            }
            Self::UnrecognizedDependencyText { requirement, text } => {
                write!(f, "{requirement}: no identifiers found in dependency text '{text}'")
            }
            Self::EmptyIdentifier { record_number } => {
                write!(f, "record {record_number}: blank identifier, record skipped")
            }
        }
    }
}
