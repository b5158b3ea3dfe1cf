//! `reqgraph cycles` command implementation.

use colored::Colorize;
use reqgraph::RequirementQueries;

use super::Session;
use super::display::{self, OutputMode};

/// Run the cycles command.
pub fn run(session: &Session, mode: OutputMode) -> anyhow::Result<()> {
    Session::require(session.config.features.cycle_diagnostics, "cycle-diagnostics")?;

    let diagnostics = session.bundle.nodes_in_cycles();

    if mode == OutputMode::Json {
        display::print_json(&diagnostics)?;
        return Ok(());
    }

    if diagnostics.nodes.is_empty() {
        println!("{}", "No circular dependencies detected.".green());
        return Ok(());
    }

    println!(
        "Found {} requirements on circular dependencies:",
        diagnostics.nodes.len().to_string().red().bold()
    );
    println!();

    for (i, cycle) in diagnostics.cycles.iter().enumerate() {
        println!("  {} {}:", "Cycle".yellow().bold(), i + 1);
        println!("    {}", cycle.display_path().dimmed());
    }

    if diagnostics.truncated {
        println!();
        println!(
            "  {} only the first {} cycles are listed (max-cycles)",
            "note:".yellow(),
            diagnostics.cycles.len()
        );
    }

    Ok(())
}
