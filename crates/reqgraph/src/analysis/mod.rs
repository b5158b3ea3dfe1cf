//! Whole-graph analysis computed once per build.
//!
//! [`analyze`] runs strongly connected components a single time and derives
//! everything else from them: levels, transitive closure, cycle membership
//! and the elementary cycle list.

mod closure;
mod cycles;
mod levels;

pub(crate) use closure::NodeSet;

use crate::domain::RequirementId;
use crate::graph::RequirementGraph;
use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use serde::Serialize;

/// An elementary dependency cycle.
///
/// Listed starting at its smallest identifier, in edge order, without
/// repeating the first node at the end.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Cycle {
    /// Members of the cycle
    pub nodes: Vec<RequirementId>,
}

impl Cycle {
    /// Number of requirements on the cycle
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the cycle is empty (never true for a reported cycle)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Identifiers joined with ` → `, closing back on the first one.
    #[must_use]
    pub fn display_path(&self) -> String {
        let mut parts: Vec<&str> = self.nodes.iter().map(RequirementId::as_str).collect();
        if let Some(first) = self.nodes.first() {
            parts.push(first.as_str());
        }
        parts.join(" → ")
    }
}

/// Per-node analysis results, indexed by `NodeIndex::index()`.
pub(crate) struct Analysis {
    pub(crate) levels: Vec<usize>,
    pub(crate) ancestors: Vec<NodeSet>,
    pub(crate) descendants: Vec<NodeSet>,
    pub(crate) in_cycle: Vec<bool>,
    pub(crate) cycles: Vec<Cycle>,
    pub(crate) cycles_truncated: bool,
    pub(crate) acyclic: bool,
}

pub(crate) fn analyze(graph: &RequirementGraph, max_cycles: usize) -> Analysis {
    let inner = graph.inner();
    let components = tarjan_scc(inner);

    let mut in_cycle = vec![false; inner.node_count()];
    for members in &components {
        if members.len() > 1 || inner.contains_edge(members[0], members[0]) {
            for node in members {
                in_cycle[node.index()] = true;
            }
        }
    }

    let levels = levels::assign_levels(inner, &in_cycle);
    let closure = closure::transitive_closure(inner, &components);
    let report = cycles::elementary_cycles(inner, &components, max_cycles);

    let mut cycles: Vec<Cycle> = report
        .cycles
        .iter()
        .map(|cycle| canonical_cycle(graph, cycle))
        .collect();
    cycles.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    debug_assert_eq!(levels.strict, !in_cycle.contains(&true));

    if report.truncated {
        tracing::warn!(limit = max_cycles, "Cycle enumeration stopped at the configured limit");
    }

    Analysis {
        levels: levels.levels,
        ancestors: closure.ancestors,
        descendants: closure.descendants,
        acyclic: levels.strict,
        in_cycle,
        cycles,
        cycles_truncated: report.truncated,
    }
}

/// Rotate a cycle so it starts at its smallest identifier.
fn canonical_cycle(graph: &RequirementGraph, nodes: &[NodeIndex]) -> Cycle {
    let mut ids: Vec<RequirementId> = nodes.iter().map(|&n| graph.id_at(n).clone()).collect();
    if let Some(start) = ids
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.cmp(b.1))
        .map(|(i, _)| i)
    {
        ids.rotate_left(start);
    }
    Cycle { nodes: ids }
}
