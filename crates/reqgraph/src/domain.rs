//! Domain types for requirement graphs.
//!
//! A [`RequirementRecord`] is one row of the input list, exactly as loaded.
//! A [`Requirement`] is the node attribute set derived from it, with every
//! absent value replaced by its default and long detail text truncated.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Area assigned to requirements that do not name one.
pub const DEFAULT_AREA: &str = "Unknown";

/// Priority assigned to requirements that do not name one (the medium tier).
pub const DEFAULT_PRIORITY: &str = "Media (P1)";

/// Sentinel for absent summary, detail, status, version, owner and roles.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder stored as dependency text when a requirement has none.
pub const NO_DEPENDENCIES: &str = "—";

/// Known priority tiers, highest first.
pub const PRIORITY_TIERS: [&str; 3] = ["Alta (P0)", "Media (P1)", "Baja (P2)"];

/// Marker appended to truncated detail text.
pub const TRUNCATION_MARKER: &str = "...";

/// Unique identifier for a requirement (e.g. `RM-001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequirementId(String);

impl RequirementId {
    /// Create a new requirement ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequirementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RequirementId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RequirementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Borrow<str> for RequirementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One row of the input requirement list.
///
/// Field names follow the English spelling; the column names of the
/// legacy spreadsheet export are accepted as aliases. Every field except
/// the identifier may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementRecord {
    /// Requirement identifier, the primary key
    #[serde(alias = "ID")]
    pub id: String,

    /// Functional area (e.g. "Seguridad")
    #[serde(default, alias = "Área", alias = "Area")]
    pub area: Option<String>,

    /// Short functional summary
    #[serde(default, alias = "Funcionalidad")]
    pub summary: Option<String>,

    /// Detailed requirement text
    #[serde(default, alias = "Requisito_detallado")]
    pub detail: Option<String>,

    /// Priority tier (e.g. "Alta (P0)")
    #[serde(default, alias = "Prioridad")]
    pub priority: Option<String>,

    /// Current status
    #[serde(default, alias = "Estatus")]
    pub status: Option<String>,

    /// Target version
    #[serde(default, alias = "Versión_objetivo", alias = "target_version")]
    pub version: Option<String>,

    /// Owner
    #[serde(default, alias = "Owner")]
    pub owner: Option<String>,

    /// Roles involved
    #[serde(default, alias = "Roles")]
    pub roles: Option<String>,

    /// Raw dependency reference text (e.g. "RM-001, RM-004" or "RM-001..RM-009")
    #[serde(default, alias = "Dependencias")]
    pub dependencies: Option<String>,
}

impl RequirementRecord {
    /// Create a record with only an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the raw dependency text.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: impl Into<String>) -> Self {
        self.dependencies = Some(dependencies.into());
        self
    }

    /// Set the area.
    #[must_use]
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    /// Set the priority tier.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Set the target version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set the detailed text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Node attributes of a requirement in the built graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    /// Requirement identifier
    pub id: RequirementId,
    /// Functional area
    pub area: String,
    /// Short functional summary
    pub summary: String,
    /// Detailed text, possibly truncated
    pub detail: String,
    /// Priority tier
    pub priority: String,
    /// Current status
    pub status: String,
    /// Target version
    pub version: String,
    /// Owner
    pub owner: String,
    /// Roles involved
    pub roles: String,
    /// Raw dependency text as written in the record
    pub dependencies: String,
}

impl Requirement {
    /// Derive node attributes from a record.
    ///
    /// Absent or blank values get their defaults. Detail text longer than
    /// `detail_max_chars` characters is cut and suffixed with
    /// [`TRUNCATION_MARKER`]; the full text is not kept.
    #[must_use]
    pub fn from_record(id: RequirementId, record: &RequirementRecord, detail_max_chars: usize) -> Self {
        let detail = or_default(record.detail.as_deref(), NOT_AVAILABLE);
        Self {
            id,
            area: or_default(record.area.as_deref(), DEFAULT_AREA),
            summary: or_default(record.summary.as_deref(), NOT_AVAILABLE),
            detail: truncate_chars(&detail, detail_max_chars),
            priority: or_default(record.priority.as_deref(), DEFAULT_PRIORITY),
            status: or_default(record.status.as_deref(), NOT_AVAILABLE),
            version: or_default(record.version.as_deref(), NOT_AVAILABLE),
            owner: or_default(record.owner.as_deref(), NOT_AVAILABLE),
            roles: or_default(record.roles.as_deref(), NOT_AVAILABLE),
            dependencies: or_default(record.dependencies.as_deref(), NO_DEPENDENCIES),
        }
    }
}

fn or_default(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Cut `text` to at most `max_chars` characters, appending the marker if cut.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}{TRUNCATION_MARKER}", &text[..byte_index]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_attributes_get_defaults() {
        let record = RequirementRecord::new("RM-001");

        let req = Requirement::from_record(RequirementId::new("RM-001"), &record, 300);

        assert_eq!(req.area, DEFAULT_AREA);
        assert_eq!(req.priority, DEFAULT_PRIORITY);
        assert_eq!(req.summary, NOT_AVAILABLE);
        assert_eq!(req.detail, NOT_AVAILABLE);
        assert_eq!(req.status, NOT_AVAILABLE);
        assert_eq!(req.version, NOT_AVAILABLE);
        assert_eq!(req.owner, NOT_AVAILABLE);
        assert_eq!(req.roles, NOT_AVAILABLE);
        assert_eq!(req.dependencies, NO_DEPENDENCIES);
    }

    #[test]
    fn blank_attributes_count_as_absent() {
        let record = RequirementRecord::new("RM-001").with_area("   ");

        let req = Requirement::from_record(RequirementId::new("RM-001"), &record, 300);

        assert_eq!(req.area, DEFAULT_AREA);
    }

    #[test]
    fn attribute_whitespace_is_trimmed() {
        let record = RequirementRecord::new("RM-001")
            .with_area("Seguridad ")
            .with_priority("  Alta (P0)");

        let req = Requirement::from_record(RequirementId::new("RM-001"), &record, 300);

        assert_eq!(req.area, "Seguridad");
        assert_eq!(req.priority, "Alta (P0)");
    }

    #[test]
    fn long_detail_is_truncated_with_marker() {
        let record = RequirementRecord::new("RM-001").with_detail("x".repeat(301));

        let req = Requirement::from_record(RequirementId::new("RM-001"), &record, 300);

        assert_eq!(req.detail.len(), 303);
        assert!(req.detail.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn detail_at_limit_is_kept_whole() {
        let text = "y".repeat(300);
        let record = RequirementRecord::new("RM-001").with_detail(text.clone());

        let req = Requirement::from_record(RequirementId::new("RM-001"), &record, 300);

        assert_eq!(req.detail, text);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("áéíóú", 3), "áéí...");
        assert_eq!(truncate_chars("áéí", 3), "áéí");
    }

    #[test]
    fn record_accepts_spreadsheet_column_names() {
        let json = r#"{"ID":"RM-002","Área":"Seguridad","Prioridad":"Alta (P0)","Versión_objetivo":"v1","Dependencias":"RM-001"}"#;

        let record: RequirementRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, "RM-002");
        assert_eq!(record.area.as_deref(), Some("Seguridad"));
        assert_eq!(record.priority.as_deref(), Some("Alta (P0)"));
        assert_eq!(record.version.as_deref(), Some("v1"));
        assert_eq!(record.dependencies.as_deref(), Some("RM-001"));
    }

    #[test]
    fn requirement_id_orders_lexicographically() {
        let mut ids = vec![RequirementId::new("RM-010"), RequirementId::new("RM-002")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "RM-002");
    }
}
