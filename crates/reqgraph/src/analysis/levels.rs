//! Hierarchical leveling for layered layout.
//!
//! On an acyclic graph every node gets `1 + max(level of its dependencies)`,
//! roots get 0. When a cycle prevents a topological order, levels come from
//! a breadth-first pass instead and are only a placement hint.

use crate::domain::Requirement;
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::VecDeque;

/// Levels indexed by node, and whether the strict (acyclic) rule applied.
pub(crate) struct Levels {
    pub(crate) levels: Vec<usize>,
    pub(crate) strict: bool,
}

/// `in_cycle` marks nodes on a cycle; it is only consulted when the graph
/// has no topological order.
pub(crate) fn assign_levels(graph: &DiGraph<Requirement, ()>, in_cycle: &[bool]) -> Levels {
    match algo::toposort(graph, None) {
        Ok(order) => Levels {
            levels: topological_levels(graph, &order),
            strict: true,
        },
        Err(cycle) => {
            tracing::debug!(
                node = %graph[cycle.node_id()].id,
                "Graph has cycles, using breadth-first leveling"
            );
            Levels {
                levels: breadth_first_levels(graph, in_cycle),
                strict: false,
            }
        }
    }
}

fn topological_levels(graph: &DiGraph<Requirement, ()>, order: &[NodeIndex]) -> Vec<usize> {
    let mut levels = vec![0; graph.node_count()];
    for &node in order {
        levels[node.index()] = graph
            .neighbors_directed(node, Direction::Incoming)
            .map(|dep| levels[dep.index()] + 1)
            .max()
            .unwrap_or(0);
    }
    levels
}

/// Breadth-first leveling that terminates on cyclic graphs.
///
/// Seeds are all nodes without dependencies, or the first node with the
/// fewest dependencies if every node has some. Each traversed edge raises
/// its target to at least `source level + 1`. A node on a cycle is expanded
/// once; any other node is expanded again whenever its level rises, so
/// edges outside cycles still go strictly upward. Nodes never reached stay
/// at 0.
fn breadth_first_levels(graph: &DiGraph<Requirement, ()>, in_cycle: &[bool]) -> Vec<usize> {
    let count = graph.node_count();
    let mut levels = vec![0; count];
    let mut visited = vec![false; count];
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();

    let in_degree = |node: NodeIndex| graph.neighbors_directed(node, Direction::Incoming).count();
    let mut seeds: Vec<NodeIndex> = graph
        .node_indices()
        .filter(|&node| in_degree(node) == 0)
        .collect();
    if seeds.is_empty() {
        seeds.extend(graph.node_indices().min_by_key(|&node| in_degree(node)));
    }

    for seed in seeds {
        visited[seed.index()] = true;
        queue.push_back(seed);
    }

    while let Some(node) = queue.pop_front() {
        let next_level = levels[node.index()] + 1;
        for dependent in graph.neighbors_directed(node, Direction::Outgoing) {
            let i = dependent.index();
            let raised = next_level > levels[i];
            if raised {
                levels[i] = next_level;
            }
            if !visited[i] || (raised && !in_cycle[i]) {
                visited[i] = true;
                queue.push_back(dependent);
            }
        }
    }

    levels
}
