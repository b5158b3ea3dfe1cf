//! Graph construction from requirement records.

use crate::config::ReqgraphConfig;
use crate::diagnostics::BuildWarning;
use crate::domain::{Requirement, RequirementId, RequirementRecord};
use crate::error::Result;
use crate::graph::RequirementGraph;
use crate::parser::DependencyParser;

/// Builds a [`RequirementGraph`] from loaded records.
///
/// Building is two passes over the records:
///
/// 1. One node per distinct identifier. A repeated identifier replaces the
///    earlier node's attributes (last write wins) but keeps its position.
/// 2. For every record, parse its dependency text and add an edge from each
///    parsed identifier to the record's own identifier, skipping identifiers
///    that are not nodes.
///
/// Because nodes are all created before any edge, a requirement may depend
/// on one that appears later in the list. Records with a repeated identifier
/// each contribute their edges.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    parser: DependencyParser,
    detail_max_chars: usize,
}

impl GraphBuilder {
    /// Create a builder with an explicit parser and truncation length.
    #[must_use]
    pub fn new(parser: DependencyParser, detail_max_chars: usize) -> Self {
        Self {
            parser,
            detail_max_chars,
        }
    }

    /// Create a builder from the session configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured identifier prefix is unusable.
    pub fn from_config(config: &ReqgraphConfig) -> Result<Self> {
        Ok(Self::new(
            DependencyParser::from_config(config)?,
            config.detail_max_chars,
        ))
    }

    /// Build the graph, discarding diagnostics.
    #[must_use]
    pub fn build(&self, records: &[RequirementRecord]) -> RequirementGraph {
        self.build_with_diagnostics(records).0
    }

    /// Build the graph and return every anomaly found along the way.
    #[must_use]
    pub fn build_with_diagnostics(
        &self,
        records: &[RequirementRecord],
    ) -> (RequirementGraph, Vec<BuildWarning>) {
        let mut graph = RequirementGraph::new();
        let mut warnings = Vec::new();

        // First pass: nodes
        let mut keyed: Vec<(RequirementId, &RequirementRecord)> = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let record_number = index + 1;
            let id = record.id.trim();
            if id.is_empty() {
                warnings.push(BuildWarning::EmptyIdentifier { record_number });
                continue;
            }

            let id = RequirementId::new(id);
            let requirement = Requirement::from_record(id.clone(), record, self.detail_max_chars);
            if graph.upsert(requirement) {
                tracing::trace!(requirement = %id, record_number, "Duplicate identifier replaces attributes");
                warnings.push(BuildWarning::DuplicateIdentifier {
                    requirement: id.clone(),
                    record_number,
                });
            }
            keyed.push((id, record));
        }

        // Second pass: edges
        for (id, record) in &keyed {
            let raw = record.dependencies.as_deref().unwrap_or_default();
            let references = self.parser.parse(raw);

            if references.is_empty() && !DependencyParser::is_placeholder(raw) {
                warnings.push(BuildWarning::UnrecognizedDependencyText {
                    requirement: id.clone(),
                    text: raw.trim().to_string(),
                });
            }

            let mut self_reported = false;
            for reference in references {
                if !graph.contains(reference.as_str()) {
                    warnings.push(BuildWarning::UnknownReference {
                        requirement: id.clone(),
                        reference,
                    });
                    continue;
                }
                if reference == *id && !self_reported {
                    self_reported = true;
                    warnings.push(BuildWarning::SelfDependency {
                        requirement: id.clone(),
                    });
                }
                graph.link(reference.as_str(), id.as_str());
            }
        }

        tracing::debug!(
            records = records.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            warnings = warnings.len(),
            "Built requirement graph"
        );

        (graph, warnings)
    }
}
