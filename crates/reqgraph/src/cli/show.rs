//! `reqgraph show` command implementation.

use colored::Colorize;
use reqgraph::{RequirementId, RequirementQueries};

use super::Session;
use super::display::{self, OutputMode};

/// Run the show command.
pub fn run(session: &Session, raw_id: &str, mode: OutputMode) -> anyhow::Result<()> {
    Session::require(session.config.features.search, "search")?;
    let id = session.resolve(raw_id)?;
    let details = session.bundle.details(id.as_str())?;

    if mode == OutputMode::Json {
        display::print_json(&details)?;
        return Ok(());
    }

    let r = &details.requirement;
    println!("{} {}", r.id.as_str().cyan().bold(), r.summary.bold());
    println!();
    println!("  {}: {}", "Area".white().bold(), r.area);
    println!("  {}: {}", "Priority".white().bold(), display::colorize_priority(&r.priority));
    println!("  {}: {}", "Status".white().bold(), r.status);
    println!("  {}: {}", "Version".white().bold(), r.version);
    println!("  {}: {}", "Owner".white().bold(), r.owner);
    println!("  {}: {}", "Roles".white().bold(), r.roles);
    println!("  {}: {}", "Depends on".white().bold(), r.dependencies);
    println!();
    println!("  {}", r.detail.dimmed());
    println!();
    println!(
        "  {}: {}  {}: {} direct, {} transitive  {}: {} direct, {} transitive",
        "Level".white().bold(),
        details.level,
        "Dependencies".white().bold(),
        details.in_degree,
        details.ancestor_count,
        "Dependents".white().bold(),
        details.out_degree,
        details.descendant_count
    );
    println!("  {}: {}", "Direct dependencies".white().bold(), id_list(&details.direct_dependencies));
    println!("  {}: {}", "Direct dependents".white().bold(), id_list(&details.direct_dependents));
    if details.in_cycle {
        println!("  {}", "Part of a circular dependency".red().bold());
    }

    Ok(())
}

fn id_list(ids: &[RequirementId]) -> String {
    if ids.is_empty() {
        return "none".dimmed().to_string();
    }
    ids.iter().map(RequirementId::as_str).collect::<Vec<_>>().join(", ")
}
