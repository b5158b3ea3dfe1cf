//! The query façade over an [`AnalysisBundle`].
//!
//! Every operation is a read of precomputed state. Results are identifier
//! sets; composing them (for example "dependents of X within area Y") is
//! plain set intersection on the caller's side.

use crate::analysis::Cycle;
use crate::bundle::AnalysisBundle;
use crate::domain::{PRIORITY_TIERS, Requirement, RequirementId};
use crate::error::{Error, Result};
use crate::graph::Edge;
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use serde::Serialize;
use std::collections::BTreeSet;

/// Attribute constraints for [`RequirementQueries::filter`].
///
/// An absent or blank constraint matches every value on that dimension;
/// the dimensions combine with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeFilter {
    /// Required functional area
    pub area: Option<String>,
    /// Required priority tier
    pub priority: Option<String>,
    /// Required target version
    pub version: Option<String>,
}

impl AttributeFilter {
    /// A filter that matches everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain the area.
    #[must_use]
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    /// Constrain the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Constrain the target version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Whether no dimension is constrained
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        [&self.area, &self.priority, &self.version]
            .into_iter()
            .all(|c| constraint(c.as_deref()).is_none())
    }

    /// Whether a requirement satisfies every constrained dimension
    #[must_use]
    pub fn matches(&self, requirement: &Requirement) -> bool {
        accepts(self.area.as_deref(), &requirement.area)
            && accepts(self.priority.as_deref(), &requirement.priority)
            && accepts(self.version.as_deref(), &requirement.version)
    }
}

fn constraint(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn accepts(wanted: Option<&str>, actual: &str) -> bool {
    constraint(wanted).is_none_or(|wanted| wanted == actual)
}

/// Cycle membership and the enumerated cycles.
#[derive(Debug, Clone, Serialize)]
pub struct CycleDiagnostics {
    /// Every requirement that lies on some cycle
    pub nodes: BTreeSet<RequirementId>,
    /// Elementary cycles, shortest first
    pub cycles: Vec<Cycle>,
    /// Whether `cycles` stopped at the configured limit
    pub truncated: bool,
}

/// Everything known about a single requirement.
#[derive(Debug, Clone, Serialize)]
pub struct NodeDetails {
    /// Node attributes
    #[serde(flatten)]
    pub requirement: Requirement,
    /// Hierarchical level
    pub level: usize,
    /// Number of direct dependencies
    pub in_degree: usize,
    /// Number of direct dependents
    pub out_degree: usize,
    /// Direct dependencies, sorted
    pub direct_dependencies: Vec<RequirementId>,
    /// Direct dependents, sorted
    pub direct_dependents: Vec<RequirementId>,
    /// Size of the transitive dependency set
    pub ancestor_count: usize,
    /// Size of the transitive dependent set
    pub descendant_count: usize,
    /// Whether the requirement lies on a cycle
    pub in_cycle: bool,
}

/// Distinct attribute values available for filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Areas, sorted
    pub areas: Vec<String>,
    /// Priorities in tier order, unknown tiers last and sorted
    pub priorities: Vec<String>,
    /// Target versions, sorted
    pub versions: Vec<String>,
}

/// Headline numbers for a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    /// Requirements in the graph
    pub node_count: usize,
    /// Dependency edges
    pub edge_count: usize,
    /// Deepest hierarchical level
    pub max_level: usize,
    /// Whether the graph has no cycles
    pub acyclic: bool,
    /// Requirements lying on a cycle
    pub cycle_node_count: usize,
    /// Cycles listed
    pub cycle_count: usize,
    /// Whether the cycle list was capped
    pub cycles_truncated: bool,
    /// Build warnings collected
    pub warning_count: usize,
}

/// Read-only queries answered from precomputed analysis.
pub trait RequirementQueries: Send + Sync {
    /// `id` together with all of its transitive dependencies.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` is not in the graph.
    fn ancestors_of(&self, id: &str) -> Result<BTreeSet<RequirementId>>;

    /// `id` together with all of its transitive dependents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` is not in the graph.
    fn descendants_of(&self, id: &str) -> Result<BTreeSet<RequirementId>>;

    /// `id` together with every requirement one edge away in either direction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` is not in the graph.
    fn neighborhood_of(&self, id: &str) -> Result<BTreeSet<RequirementId>>;

    /// Requirements matching every constrained attribute.
    fn filter(&self, filter: &AttributeFilter) -> BTreeSet<RequirementId>;

    /// Cycle members and the enumerated cycles.
    fn nodes_in_cycles(&self) -> CycleDiagnostics;

    /// Attributes and structural figures of one requirement.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` is not in the graph.
    fn details(&self, id: &str) -> Result<NodeDetails>;

    /// Canonical identifier for user input (trimmed, upper-cased).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if no such requirement exists.
    fn resolve(&self, raw: &str) -> Result<RequirementId>;

    /// Distinct attribute values, for building filter controls.
    fn filter_options(&self) -> FilterOptions;

    /// Edges whose endpoints are both in `nodes`.
    fn edges_within(&self, nodes: &BTreeSet<RequirementId>) -> Vec<Edge>;

    /// Headline numbers.
    fn summary(&self) -> GraphSummary;
}

impl RequirementQueries for AnalysisBundle {
    fn ancestors_of(&self, id: &str) -> Result<BTreeSet<RequirementId>> {
        let mut set = self.ancestors(id)?;
        set.insert(RequirementId::new(id));
        Ok(set)
    }

    fn descendants_of(&self, id: &str) -> Result<BTreeSet<RequirementId>> {
        let mut set = self.descendants(id)?;
        set.insert(RequirementId::new(id));
        Ok(set)
    }

    fn neighborhood_of(&self, id: &str) -> Result<BTreeSet<RequirementId>> {
        let graph = self.graph();
        let node = graph
            .index_of(id)
            .ok_or_else(|| Error::UnknownNode(RequirementId::new(id)))?;
        let mut set: BTreeSet<RequirementId> = graph
            .inner()
            .neighbors_undirected(node)
            .map(|n| graph.id_at(n).clone())
            .collect();
        set.insert(graph.id_at(node).clone());
        Ok(set)
    }

    fn filter(&self, filter: &AttributeFilter) -> BTreeSet<RequirementId> {
        self.graph()
            .requirements()
            .filter(|r| filter.matches(r))
            .map(|r| r.id.clone())
            .collect()
    }

    fn nodes_in_cycles(&self) -> CycleDiagnostics {
        let graph = self.graph();
        let nodes = self
            .analysis()
            .in_cycle
            .iter()
            .enumerate()
            .filter(|(_, on_cycle)| **on_cycle)
            .map(|(i, _)| graph.id_at(NodeIndex::new(i)).clone())
            .collect();
        CycleDiagnostics {
            nodes,
            cycles: self.cycles().to_vec(),
            truncated: self.cycles_truncated(),
        }
    }

    fn details(&self, id: &str) -> Result<NodeDetails> {
        let graph = self.graph();
        let node = graph
            .index_of(id)
            .ok_or_else(|| Error::UnknownNode(RequirementId::new(id)))?;
        let inner = graph.inner();
        let analysis = self.analysis();
        let i = node.index();
        let sorted = |mut ids: Vec<&RequirementId>| {
            ids.sort();
            ids.into_iter().cloned().collect::<Vec<_>>()
        };
        Ok(NodeDetails {
            requirement: inner[node].clone(),
            level: analysis.levels[i],
            in_degree: inner.neighbors_directed(node, Direction::Incoming).count(),
            out_degree: inner.neighbors_directed(node, Direction::Outgoing).count(),
            direct_dependencies: sorted(graph.dependencies_of(id)),
            direct_dependents: sorted(graph.dependents_of(id)),
            ancestor_count: analysis.ancestors[i].len(),
            descendant_count: analysis.descendants[i].len(),
            in_cycle: analysis.in_cycle[i],
        })
    }

    fn resolve(&self, raw: &str) -> Result<RequirementId> {
        let candidate = raw.trim().to_uppercase();
        if self.graph().contains(&candidate) {
            Ok(RequirementId::new(candidate))
        } else {
            Err(Error::UnknownNode(RequirementId::new(candidate)))
        }
    }

    fn filter_options(&self) -> FilterOptions {
        let mut areas = BTreeSet::new();
        let mut priorities = BTreeSet::new();
        let mut versions = BTreeSet::new();
        for requirement in self.graph().requirements() {
            areas.insert(requirement.area.clone());
            priorities.insert(requirement.priority.clone());
            versions.insert(requirement.version.clone());
        }

        let mut priorities: Vec<String> = priorities.into_iter().collect();
        priorities.sort_by_key(|p| {
            let tier = PRIORITY_TIERS
                .iter()
                .position(|t| *t == p.as_str())
                .unwrap_or(PRIORITY_TIERS.len());
            (tier, p.clone())
        });

        FilterOptions {
            areas: areas.into_iter().collect(),
            priorities,
            versions: versions.into_iter().collect(),
        }
    }

    fn edges_within(&self, nodes: &BTreeSet<RequirementId>) -> Vec<Edge> {
        self.graph()
            .edges()
            .filter(|e| nodes.contains(&e.from) && nodes.contains(&e.to))
            .collect()
    }

    fn summary(&self) -> GraphSummary {
        let analysis = self.analysis();
        GraphSummary {
            node_count: self.graph().node_count(),
            edge_count: self.graph().edge_count(),
            max_level: analysis.levels.iter().copied().max().unwrap_or(0),
            acyclic: self.is_acyclic(),
            cycle_node_count: analysis.in_cycle.iter().filter(|&&c| c).count(),
            cycle_count: self.cycles().len(),
            cycles_truncated: self.cycles_truncated(),
            warning_count: self.warnings().len(),
        }
    }
}
