//! `reqgraph stats` command implementation.

use colored::Colorize;
use reqgraph::RequirementQueries;

use super::Session;
use super::display::{self, OutputMode};

/// Run the stats command.
pub fn run(session: &Session, mode: OutputMode) -> anyhow::Result<()> {
    let summary = session.bundle.summary();

    if mode == OutputMode::Json {
        display::print_json(&summary)?;
        return Ok(());
    }

    println!("{}", "Requirement Graph Statistics".cyan().bold());
    println!();
    println!(
        "  {}: {}",
        "Requirements".white().bold(),
        summary.node_count.to_string().green()
    );
    println!(
        "  {}: {}",
        "Dependencies".white().bold(),
        summary.edge_count.to_string().green()
    );
    println!("  {}: {}", "Deepest level".white().bold(), summary.max_level);
    println!();

    if summary.acyclic {
        println!("  {}", "No circular dependencies".green());
    } else {
        let more = if summary.cycles_truncated { "+" } else { "" };
        println!(
            "  {}: {} requirements on {}{} cycles",
            "Cycles".white().bold(),
            summary.cycle_node_count.to_string().red().bold(),
            summary.cycle_count,
            more
        );
    }

    let warnings = summary.warning_count + session.load_warnings.len();
    if warnings > 0 {
        println!(
            "  {}: {} (run {} for details)",
            "Warnings".white().bold(),
            warnings.to_string().yellow(),
            "reqgraph check".cyan()
        );
    }

    Ok(())
}
