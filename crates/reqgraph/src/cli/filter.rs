//! `reqgraph filter` command implementation.

use std::collections::BTreeSet;

use colored::Colorize;
use reqgraph::{FilterOptions, RequirementId, RequirementQueries};
use serde::Serialize;

use super::display::{self, OutputMode};
use super::{FilterArgs, Session};

#[derive(Serialize)]
struct FilterOutput<'a> {
    nodes: &'a BTreeSet<RequirementId>,
    edges: usize,
    options: &'a FilterOptions,
}

/// Run the filter command.
pub fn run(session: &Session, filter: &FilterArgs, mode: OutputMode) -> anyhow::Result<()> {
    Session::require(session.config.features.filtering, "filtering")?;

    let bundle = &session.bundle;
    let nodes = bundle.filter(&filter.to_filter());
    let edges = bundle.edges_within(&nodes).len();
    let options = bundle.filter_options();

    if mode == OutputMode::Json {
        display::print_json(&FilterOutput {
            nodes: &nodes,
            edges,
            options: &options,
        })?;
        return Ok(());
    }

    display::print_requirements(bundle, &nodes, "No requirements match these filters.");
    println!();
    println!(
        "  {} of {} requirements, {} dependencies visible",
        nodes.len().to_string().green(),
        bundle.graph().node_count(),
        edges
    );
    println!();
    println!("  {}: {}", "Areas".white().bold(), options.areas.join(", ").dimmed());
    println!(
        "  {}: {}",
        "Priorities".white().bold(),
        options.priorities.join(", ").dimmed()
    );
    println!("  {}: {}", "Versions".white().bold(), options.versions.join(", ").dimmed());

    Ok(())
}
