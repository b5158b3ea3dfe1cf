//! The immutable analysis bundle and its swappable handle.
//!
//! An [`AnalysisBundle`] holds the graph together with everything derived
//! from it. It is built once per input snapshot and never mutated, so any
//! number of readers can share it. Long-lived consumers that need to pick
//! up a new snapshot go through a [`BundleHandle`], which replaces the whole
//! bundle at once.

use crate::analysis::{self, Analysis, Cycle, NodeSet};
use crate::builder::GraphBuilder;
use crate::config::ReqgraphConfig;
use crate::diagnostics::BuildWarning;
use crate::domain::{RequirementId, RequirementRecord};
use crate::error::{Error, Result};
use crate::graph::RequirementGraph;
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

/// A built graph plus its precomputed levels, closures and cycles.
pub struct AnalysisBundle {
    graph: RequirementGraph,
    analysis: Analysis,
    warnings: Vec<BuildWarning>,
}

impl AnalysisBundle {
    /// Build the graph from records and analyse it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid. Bad records
    /// never fail the build; they show up in [`warnings`](Self::warnings).
    pub fn build(records: &[RequirementRecord], config: &ReqgraphConfig) -> Result<Self> {
        config.validate()?;
        let builder = GraphBuilder::from_config(config)?;
        let (graph, warnings) = builder.build_with_diagnostics(records);
        Ok(Self::from_graph(graph, warnings, config.max_cycles))
    }

    /// Analyse an already built graph.
    #[must_use]
    pub fn from_graph(
        graph: RequirementGraph,
        warnings: Vec<BuildWarning>,
        max_cycles: usize,
    ) -> Self {
        let analysis = analysis::analyze(&graph, max_cycles);
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            cycles = analysis.cycles.len(),
            acyclic = analysis.acyclic,
            "Analysed requirement graph"
        );
        Self {
            graph,
            analysis,
            warnings,
        }
    }

    /// The underlying graph
    #[must_use]
    pub fn graph(&self) -> &RequirementGraph {
        &self.graph
    }

    /// Anomalies collected while building
    #[must_use]
    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    /// Hierarchical level of a requirement.
    ///
    /// Only strictly increasing along edges when [`is_acyclic`](Self::is_acyclic).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` is not in the graph.
    pub fn level(&self, id: &str) -> Result<usize> {
        Ok(self.analysis.levels[self.index(id)?])
    }

    /// Transitive dependencies of a requirement, excluding itself unless it
    /// lies on a cycle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` is not in the graph.
    pub fn ancestors(&self, id: &str) -> Result<BTreeSet<RequirementId>> {
        let set = &self.analysis.ancestors[self.index(id)?];
        Ok(self.ids(set))
    }

    /// Transitive dependents of a requirement, excluding itself unless it
    /// lies on a cycle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` is not in the graph.
    pub fn descendants(&self, id: &str) -> Result<BTreeSet<RequirementId>> {
        let set = &self.analysis.descendants[self.index(id)?];
        Ok(self.ids(set))
    }

    /// Whether a requirement lies on some dependency cycle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` is not in the graph.
    pub fn in_cycle(&self, id: &str) -> Result<bool> {
        Ok(self.analysis.in_cycle[self.index(id)?])
    }

    /// Elementary cycles, shortest first, capped at the configured limit.
    #[must_use]
    pub fn cycles(&self) -> &[Cycle] {
        &self.analysis.cycles
    }

    /// Whether more cycles exist than [`cycles`](Self::cycles) lists.
    #[must_use]
    pub fn cycles_truncated(&self) -> bool {
        self.analysis.cycles_truncated
    }

    /// Whether the graph has no cycles (self-loops included)
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        self.analysis.acyclic
    }

    pub(crate) fn index(&self, id: &str) -> Result<usize> {
        self.graph
            .index_of(id)
            .map(|node| node.index())
            .ok_or_else(|| Error::UnknownNode(RequirementId::new(id)))
    }

    pub(crate) fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    fn ids(&self, set: &NodeSet) -> BTreeSet<RequirementId> {
        set.iter().map(|&node| self.graph.id_at(node).clone()).collect()
    }
}

/// Shared holder for the active bundle.
///
/// Readers take a cheap [`Arc`] snapshot and keep using it even if the
/// bundle is replaced in the meantime.
pub struct BundleHandle {
    current: RwLock<Arc<AnalysisBundle>>,
}

impl BundleHandle {
    /// Wrap an initial bundle
    #[must_use]
    pub fn new(bundle: AnalysisBundle) -> Self {
        Self {
            current: RwLock::new(Arc::new(bundle)),
        }
    }

    /// Snapshot of the active bundle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the lock was poisoned.
    pub fn current(&self) -> Result<Arc<AnalysisBundle>> {
        let guard = self
            .current
            .read()
            .map_err(|e| Error::Internal(format!("bundle lock poisoned: {e}")))?;
        Ok(Arc::clone(&guard))
    }

    /// Install a new bundle and return the one it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the lock was poisoned.
    pub fn replace(&self, bundle: AnalysisBundle) -> Result<Arc<AnalysisBundle>> {
        let mut guard = self
            .current
            .write()
            .map_err(|e| Error::Internal(format!("bundle lock poisoned: {e}")))?;
        Ok(std::mem::replace(&mut *guard, Arc::new(bundle)))
    }
}
