//! Elementary cycle enumeration.
//!
//! Johnson's algorithm, run iteratively so deep cycles cannot overflow the
//! call stack. Self-loops are reported first. The enumeration stops as soon
//! as the configured number of cycles has been collected and one more is
//! found, so callers can tell a complete list from a truncated one.

use crate::domain::Requirement;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

/// Cycles found, each listed in traversal order without repeating its start.
pub(crate) struct CycleReport {
    pub(crate) cycles: Vec<Vec<NodeIndex>>,
    pub(crate) truncated: bool,
}

struct Collector {
    cycles: Vec<Vec<NodeIndex>>,
    limit: usize,
    truncated: bool,
}

impl Collector {
    fn new(limit: usize) -> Self {
        Self {
            cycles: Vec::new(),
            limit,
            truncated: false,
        }
    }

    /// Record a cycle. Returns `false` once the limit is exceeded.
    fn push(&mut self, cycle: Vec<NodeIndex>) -> bool {
        if self.cycles.len() >= self.limit {
            self.truncated = true;
            return false;
        }
        self.cycles.push(cycle);
        true
    }

    fn finish(self) -> CycleReport {
        CycleReport {
            cycles: self.cycles,
            truncated: self.truncated,
        }
    }
}

/// Enumerate up to `limit` elementary cycles.
///
/// `components` are the strongly connected components of `graph`; only
/// those with more than one node are searched for multi-node cycles.
pub(crate) fn elementary_cycles(
    graph: &DiGraph<Requirement, ()>,
    components: &[Vec<NodeIndex>],
    limit: usize,
) -> CycleReport {
    let mut collector = Collector::new(limit);

    for node in graph.node_indices() {
        if graph.contains_edge(node, node) && !collector.push(vec![node]) {
            return collector.finish();
        }
    }

    let mut work: Vec<Vec<NodeIndex>> = components
        .iter()
        .filter(|members| members.len() > 1)
        .cloned()
        .collect();

    while let Some(mut component) = work.pop() {
        component.sort_unstable();
        let start = component[0];
        let members: HashSet<NodeIndex> = component.iter().copied().collect();
        if !circuits_through(graph, start, &members, &mut collector) {
            break;
        }
        // Every cycle through `start` is known; search the rest without it.
        work.extend(strongly_connected_within(graph, &component[1..]));
    }

    collector.finish()
}

/// Report every elementary cycle through `start` that stays inside `members`.
///
/// Returns `false` if the collector asked to stop.
fn circuits_through(
    graph: &DiGraph<Requirement, ()>,
    start: NodeIndex,
    members: &HashSet<NodeIndex>,
    collector: &mut Collector,
) -> bool {
    let successors = |node: NodeIndex| -> Vec<NodeIndex> {
        graph
            .neighbors(node)
            .filter(|next| *next != node && members.contains(next))
            .collect()
    };

    let mut path = vec![start];
    let mut blocked: HashSet<NodeIndex> = HashSet::from([start]);
    let mut closed: HashSet<NodeIndex> = HashSet::new();
    let mut waiting: HashMap<NodeIndex, HashSet<NodeIndex>> = HashMap::new();
    let mut stack = vec![(start, successors(start))];

    while let Some(frame) = stack.last_mut() {
        let node = frame.0;
        let next = frame.1.pop();
        let exhausted = frame.1.is_empty();

        if let Some(next) = next {
            if next == start {
                if !collector.push(path.clone()) {
                    return false;
                }
                closed.extend(path.iter().copied());
            } else if !blocked.contains(&next) {
                path.push(next);
                closed.remove(&next);
                blocked.insert(next);
                stack.push((next, successors(next)));
                continue;
            }
        }

        if exhausted {
            if closed.contains(&node) {
                unblock(node, &mut blocked, &mut waiting);
            } else {
                for successor in successors(node) {
                    waiting.entry(successor).or_default().insert(node);
                }
            }
            stack.pop();
            path.pop();
        }
    }

    true
}

fn unblock(
    node: NodeIndex,
    blocked: &mut HashSet<NodeIndex>,
    waiting: &mut HashMap<NodeIndex, HashSet<NodeIndex>>,
) {
    let mut pending = vec![node];
    while let Some(current) = pending.pop() {
        if blocked.remove(&current) {
            if let Some(dependents) = waiting.remove(&current) {
                pending.extend(dependents);
            }
        }
    }
}

/// Multi-node strongly connected components of the subgraph induced by `nodes`.
fn strongly_connected_within(
    graph: &DiGraph<Requirement, ()>,
    nodes: &[NodeIndex],
) -> Vec<Vec<NodeIndex>> {
    let mut sub: DiGraph<NodeIndex, ()> = DiGraph::with_capacity(nodes.len(), 0);
    let local: HashMap<NodeIndex, NodeIndex> =
        nodes.iter().map(|&node| (node, sub.add_node(node))).collect();

    for (&node, &source) in &local {
        for next in graph.neighbors(node) {
            if next == node {
                continue;
            }
            if let Some(&target) = local.get(&next) {
                sub.add_edge(source, target, ());
            }
        }
    }

    tarjan_scc(&sub)
        .into_iter()
        .filter(|members| members.len() > 1)
        .map(|members| members.into_iter().map(|local| sub[local]).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RequirementId, RequirementRecord};
    use rstest::rstest;

    fn graph(nodes: usize, edges: &[(usize, usize)]) -> DiGraph<Requirement, ()> {
        let mut g = DiGraph::new();
        for i in 0..nodes {
            let id = format!("N-{i}");
            g.add_node(Requirement::from_record(
                RequirementId::new(id.clone()),
                &RequirementRecord::new(id),
                300,
            ));
        }
        for &(a, b) in edges {
            g.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
        }
        g
    }

    fn report(g: &DiGraph<Requirement, ()>, limit: usize) -> CycleReport {
        elementary_cycles(g, &tarjan_scc(g), limit)
    }

    /// Cycles as sorted index lists, for order-independent comparison.
    fn normalized(report: &CycleReport) -> Vec<Vec<usize>> {
        let mut cycles: Vec<Vec<usize>> = report
            .cycles
            .iter()
            .map(|cycle| {
                let mut ids: Vec<usize> = cycle.iter().map(|n| n.index()).collect();
                ids.sort_unstable();
                ids
            })
            .collect();
        cycles.sort();
        cycles
    }

    const COMPLETE_3: &[(usize, usize)] = &[(0, 1), (1, 0), (1, 2), (2, 1), (0, 2), (2, 0)];

    #[test]
    fn acyclic_graph_has_no_cycles() {
        let g = graph(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);

        let report = report(&g, 100);

        assert!(report.cycles.is_empty());
        assert!(!report.truncated);
    }

    #[test]
    fn two_node_cycle() {
        let g = graph(2, &[(0, 1), (1, 0)]);

        assert_eq!(normalized(&report(&g, 100)), vec![vec![0, 1]]);
    }

    #[test]
    fn complete_digraph_on_three_nodes() {
        let g = graph(3, COMPLETE_3);

        let report = report(&g, 100);

        assert_eq!(report.cycles.len(), 5);
        assert_eq!(
            normalized(&report),
            vec![vec![0, 1], vec![0, 1, 2], vec![0, 1, 2], vec![0, 2], vec![1, 2]]
        );
        assert!(!report.truncated);
    }

    #[test]
    fn self_loops_come_first() {
        let g = graph(3, &[(2, 2), (0, 1), (1, 0)]);

        let report = report(&g, 100);

        assert_eq!(report.cycles[0], vec![NodeIndex::new(2)]);
        assert_eq!(report.cycles.len(), 2);
    }

    #[test]
    fn cycles_follow_edges() {
        let g = graph(4, &[(0, 1), (1, 2), (2, 3), (3, 0), (1, 3)]);

        let report = report(&g, 100);

        assert_eq!(report.cycles.len(), 2);
        for cycle in &report.cycles {
            for (i, &node) in cycle.iter().enumerate() {
                let next = cycle[(i + 1) % cycle.len()];
                assert!(g.contains_edge(node, next), "missing edge in {cycle:?}");
            }
        }
    }

    #[rstest]
    #[case::under_limit(10, 5, false)]
    #[case::exactly_at_limit(5, 5, false)]
    #[case::over_limit(2, 2, true)]
    #[case::zero_limit(0, 0, true)]
    fn limit_truncates(#[case] limit: usize, #[case] expected: usize, #[case] truncated: bool) {
        let g = graph(3, COMPLETE_3);

        let report = report(&g, limit);

        assert_eq!(report.cycles.len(), expected);
        assert_eq!(report.truncated, truncated);
    }

    #[test]
    fn separate_components_are_both_searched() {
        let g = graph(5, &[(0, 1), (1, 0), (2, 3), (3, 4), (4, 2), (1, 2)]);

        assert_eq!(normalized(&report(&g, 100)), vec![vec![0, 1], vec![2, 3, 4]]);
    }
}
