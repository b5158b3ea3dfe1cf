//! Transitive ancestor and descendant sets.
//!
//! Rather than one reachability search per node, nodes are grouped into
//! strongly connected components and reachability is propagated once over
//! the component DAG. Every node of a component shares the same sets.
//!
//! A node on a cycle reaches itself, so it appears in its own sets; a node
//! off every cycle never does.

use crate::domain::Requirement;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::BTreeSet;
use std::sync::Arc;

/// A shared, immutable set of nodes.
pub(crate) type NodeSet = Arc<BTreeSet<NodeIndex>>;

/// Per-node ancestor and descendant sets, indexed by node.
pub(crate) struct Closure {
    pub(crate) ancestors: Vec<NodeSet>,
    pub(crate) descendants: Vec<NodeSet>,
}

/// Compute the closure from the graph and its strongly connected components.
///
/// `components` must be in the order returned by `petgraph::algo::tarjan_scc`:
/// every component appears after all components it has edges into.
pub(crate) fn transitive_closure(
    graph: &DiGraph<Requirement, ()>,
    components: &[Vec<NodeIndex>],
) -> Closure {
    let mut component_of = vec![0; graph.node_count()];
    for (c, members) in components.iter().enumerate() {
        for node in members {
            component_of[node.index()] = c;
        }
    }

    let cyclic: Vec<bool> = components
        .iter()
        .map(|members| members.len() > 1 || graph.contains_edge(members[0], members[0]))
        .collect();

    let count = components.len();
    let empty: NodeSet = Arc::default();
    let mut down = vec![Arc::clone(&empty); count];
    let mut up = vec![empty; count];

    // Successor components come first in tarjan order.
    for c in 0..count {
        down[c] = reach(graph, components, &component_of, &cyclic, &down, c, Direction::Outgoing);
    }
    // Predecessor components come later, so walk backwards.
    for c in (0..count).rev() {
        up[c] = reach(graph, components, &component_of, &cyclic, &up, c, Direction::Incoming);
    }

    let per_node = |sets: &[NodeSet]| -> Vec<NodeSet> {
        component_of.iter().map(|&c| Arc::clone(&sets[c])).collect()
    };

    Closure {
        ancestors: per_node(&up),
        descendants: per_node(&down),
    }
}

/// Nodes reachable from component `c` in `direction`, given the sets of
/// every component adjacent to it.
fn reach(
    graph: &DiGraph<Requirement, ()>,
    components: &[Vec<NodeIndex>],
    component_of: &[usize],
    cyclic: &[bool],
    done: &[NodeSet],
    c: usize,
    direction: Direction,
) -> NodeSet {
    let mut set = BTreeSet::new();
    if cyclic[c] {
        set.extend(components[c].iter().copied());
    }
    for &node in &components[c] {
        for neighbor in graph.neighbors_directed(node, direction) {
            let d = component_of[neighbor.index()];
            if d != c {
                set.extend(components[d].iter().copied());
                set.extend(done[d].iter().copied());
            }
        }
    }
    Arc::new(set)
}
