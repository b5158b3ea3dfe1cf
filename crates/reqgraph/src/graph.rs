//! The requirement dependency graph.
//!
//! # Edge Direction Convention
//!
//! Edges point from **dependency to dependent**: if `RM-002` lists `RM-001`
//! as a dependency, the edge is `RM-001 -> RM-002`. Following edges forward
//! therefore walks towards work that is unblocked later; following them
//! backward walks towards prerequisites.
//!
//! The graph is built once by [`GraphBuilder`](crate::builder::GraphBuilder)
//! and is read-only afterwards. At most one edge exists between an ordered
//! pair of nodes; self-loops are allowed.

use crate::domain::{Requirement, RequirementId};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::Serialize;
use std::collections::HashMap;

/// A directed `{from, to}` dependency edge.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Edge {
    /// The dependency
    pub from: RequirementId,
    /// The dependent
    pub to: RequirementId,
}

/// Directed graph of requirements.
#[derive(Debug, Clone, Default)]
pub struct RequirementGraph {
    /// Nodes carry requirement attributes; edges carry nothing.
    graph: DiGraph<Requirement, ()>,

    /// Mapping from identifier to graph node.
    ///
    /// Every node in `graph` has exactly one entry here.
    node_map: HashMap<RequirementId, NodeIndex>,
}

impl RequirementGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requirements
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of dependency edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` if `id` is a node
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Attributes of a requirement, if present
    #[must_use]
    pub fn requirement(&self, id: &str) -> Option<&Requirement> {
        self.node_map.get(id).map(|&node| &self.graph[node])
    }

    /// All requirements in insertion order
    pub fn requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.graph.node_weights()
    }

    /// All edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.edge_references().map(|edge| Edge {
            from: self.graph[edge.source()].id.clone(),
            to: self.graph[edge.target()].id.clone(),
        })
    }

    /// Returns `true` if there is an edge `from -> to`
    #[must_use]
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_map.get(from), self.node_map.get(to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Direct dependencies of `id` (sources of incoming edges)
    #[must_use]
    pub fn dependencies_of(&self, id: &str) -> Vec<&RequirementId> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Direct dependents of `id` (targets of outgoing edges)
    #[must_use]
    pub fn dependents_of(&self, id: &str) -> Vec<&RequirementId> {
        self.neighbors(id, Direction::Outgoing)
    }

    fn neighbors(&self, id: &str, direction: Direction) -> Vec<&RequirementId> {
        self.node_map.get(id).map_or_else(Vec::new, |&node| {
            self.graph
                .neighbors_directed(node, direction)
                .map(|n| &self.graph[n].id)
                .collect()
        })
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    pub(crate) fn id_at(&self, node: NodeIndex) -> &RequirementId {
        &self.graph[node].id
    }

    pub(crate) fn inner(&self) -> &DiGraph<Requirement, ()> {
        &self.graph
    }

    /// Insert a requirement, replacing the attributes of an existing node
    /// with the same identifier.
    ///
    /// Returns `true` if an existing node was replaced.
    pub(crate) fn upsert(&mut self, requirement: Requirement) -> bool {
        if let Some(&node) = self.node_map.get(&requirement.id) {
            self.graph[node] = requirement;
            true
        } else {
            let id = requirement.id.clone();
            let node = self.graph.add_node(requirement);
            self.node_map.insert(id, node);
            false
        }
    }

    /// Add the edge `from -> to` unless it already exists.
    ///
    /// Both endpoints must already be nodes; returns `false` otherwise.
    pub(crate) fn link(&mut self, from: &str, to: &str) -> bool {
        match (self.node_map.get(from), self.node_map.get(to)) {
            (Some(&a), Some(&b)) => {
                self.graph.update_edge(a, b, ());
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RequirementRecord;

    fn requirement(id: &str) -> Requirement {
        Requirement::from_record(RequirementId::new(id), &RequirementRecord::new(id), 300)
    }

    #[test]
    fn upsert_replaces_existing_node_in_place() {
        let mut graph = RequirementGraph::new();
        assert!(!graph.upsert(requirement("RM-001")));
        assert!(!graph.upsert(requirement("RM-002")));

        let mut replacement = requirement("RM-001");
        replacement.area = "Seguridad".to_string();
        assert!(graph.upsert(replacement));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.requirement("RM-001").unwrap().area, "Seguridad");
        let order: Vec<_> = graph.requirements().map(|r| r.id.as_str()).collect();
        assert_eq!(order, ["RM-001", "RM-002"]);
    }

    #[test]
    fn link_never_creates_parallel_edges() {
        let mut graph = RequirementGraph::new();
        graph.upsert(requirement("RM-001"));
        graph.upsert(requirement("RM-002"));

        assert!(graph.link("RM-001", "RM-002"));
        assert!(graph.link("RM-001", "RM-002"));

        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge("RM-001", "RM-002"));
        assert!(!graph.has_edge("RM-002", "RM-001"));
    }

    #[test]
    fn link_requires_both_endpoints() {
        let mut graph = RequirementGraph::new();
        graph.upsert(requirement("RM-001"));

        assert!(!graph.link("RM-404", "RM-001"));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn neighbors_follow_edge_direction() {
        let mut graph = RequirementGraph::new();
        for id in ["A-1", "A-2", "A-3"] {
            graph.upsert(requirement(id));
        }
        graph.link("A-1", "A-2");
        graph.link("A-2", "A-3");

        let deps: Vec<_> = graph.dependencies_of("A-2").into_iter().map(RequirementId::as_str).collect();
        let dependents: Vec<_> = graph.dependents_of("A-2").into_iter().map(RequirementId::as_str).collect();

        assert_eq!(deps, ["A-1"]);
        assert_eq!(dependents, ["A-3"]);
        assert!(graph.dependencies_of("missing").is_empty());
    }
}
