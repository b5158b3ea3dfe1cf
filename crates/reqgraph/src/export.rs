//! Serialisable snapshot of a bundle for rendering collaborators.
//!
//! [`GraphExport`] is the whole output contract in one value: node records
//! with their level and cycle flag, the edge list, the per-node ancestry map,
//! the cycle list and the build warnings. Sections tied to a disabled
//! feature are left out.

use crate::bundle::AnalysisBundle;
use crate::config::Features;
use crate::diagnostics::BuildWarning;
use crate::domain::{Requirement, RequirementId};
use crate::error::Result;
use crate::graph::Edge;
use crate::query::{CycleDiagnostics, FilterOptions, RequirementQueries};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A node with its attributes and layout data.
#[derive(Debug, Clone, Serialize)]
pub struct NodeRecord {
    /// Node attributes
    #[serde(flatten)]
    pub requirement: Requirement,
    /// Hierarchical level
    pub level: usize,
    /// Whether the node lies on a cycle
    pub in_cycle: bool,
    /// Number of direct dependencies
    pub in_degree: usize,
    /// Number of direct dependents
    pub out_degree: usize,
}

/// Transitive relatives of one node, the node itself excluded unless cyclic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ancestry {
    /// Transitive dependencies
    pub ancestors: BTreeSet<RequirementId>,
    /// Transitive dependents
    pub descendants: BTreeSet<RequirementId>,
}

/// Everything a renderer needs, ready for serialisation.
#[derive(Debug, Clone, Serialize)]
pub struct GraphExport {
    /// Nodes in input order
    pub nodes: Vec<NodeRecord>,
    /// Dependency edges
    pub edges: Vec<Edge>,
    /// Ancestors and descendants per node
    pub ancestry: BTreeMap<RequirementId, Ancestry>,
    /// Cycle diagnostics, when enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycles: Option<CycleDiagnostics>,
    /// Filter facets, when filtering is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterOptions>,
    /// Build warnings
    pub warnings: Vec<BuildWarning>,
}

impl GraphExport {
    /// Snapshot a bundle.
    ///
    /// # Errors
    ///
    /// Only fails if the bundle is internally inconsistent.
    pub fn from_bundle(bundle: &AnalysisBundle, features: &Features) -> Result<Self> {
        let mut nodes = Vec::with_capacity(bundle.graph().node_count());
        let mut ancestry = BTreeMap::new();

        for requirement in bundle.graph().requirements() {
            let id = requirement.id.as_str();
            let details = bundle.details(id)?;
            nodes.push(NodeRecord {
                requirement: details.requirement,
                level: details.level,
                in_cycle: details.in_cycle,
                in_degree: details.in_degree,
                out_degree: details.out_degree,
            });
            ancestry.insert(
                requirement.id.clone(),
                Ancestry {
                    ancestors: bundle.ancestors(id)?,
                    descendants: bundle.descendants(id)?,
                },
            );
        }

        Ok(Self {
            nodes,
            edges: bundle.graph().edges().collect(),
            ancestry,
            cycles: features.cycle_diagnostics.then(|| bundle.nodes_in_cycles()),
            filters: features.filtering.then(|| bundle.filter_options()),
            warnings: bundle.warnings().to_vec(),
        })
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::error::Error::Json) if serialisation fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
