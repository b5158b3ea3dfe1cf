//! `reqgraph ancestors`, `descendants` and `neighbors` command implementations.

use std::collections::BTreeSet;

use colored::Colorize;
use reqgraph::{RequirementId, RequirementQueries};
use serde::Serialize;

use super::display::{self, OutputMode};
use super::{FilterArgs, Session};

/// Which related set to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Ancestors,
    Descendants,
    Neighbors,
}

impl Relation {
    fn heading(self) -> &'static str {
        match self {
            Self::Ancestors => "Dependencies of",
            Self::Descendants => "Dependents of",
            Self::Neighbors => "Neighborhood of",
        }
    }
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    id: &'a RequirementId,
    nodes: &'a BTreeSet<RequirementId>,
    edges: usize,
}

/// Run a relation query, optionally narrowed by attribute constraints.
pub fn run(
    session: &Session,
    relation: Relation,
    raw_id: &str,
    filter: &FilterArgs,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let features = session.config.features;
    Session::require(features.search, "search")?;

    let bundle = &session.bundle;
    let id = session.resolve(raw_id)?;
    let mut nodes = match relation {
        Relation::Ancestors => bundle.ancestors_of(id.as_str())?,
        Relation::Descendants => bundle.descendants_of(id.as_str())?,
        Relation::Neighbors => bundle.neighborhood_of(id.as_str())?,
    };

    let filter = filter.to_filter();
    if !filter.is_unconstrained() {
        Session::require(features.filtering, "filtering")?;
        let matching = bundle.filter(&filter);
        nodes.retain(|n| matching.contains(n));
    }
    let edges = bundle.edges_within(&nodes).len();

    if mode == OutputMode::Json {
        display::print_json(&QueryOutput {
            id: &id,
            nodes: &nodes,
            edges,
        })?;
        return Ok(());
    }

    println!("{} {}:", relation.heading(), id.as_str().cyan().bold());
    println!();
    display::print_requirements(bundle, &nodes, "No matching requirements.");
    println!();
    println!(
        "  {} requirements, {} dependencies visible",
        nodes.len().to_string().green(),
        edges
    );

    Ok(())
}
