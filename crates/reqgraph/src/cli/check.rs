//! `reqgraph check` command implementation.

use colored::Colorize;
use reqgraph::BuildWarning;
use serde::Serialize;

use super::Session;
use super::display::{self, OutputMode};

#[derive(Serialize)]
struct CheckOutput<'a> {
    load: Vec<String>,
    build: &'a [BuildWarning],
}

/// Run the check command.
///
/// With `strict`, any warning turns into a failing exit status.
pub fn run(session: &Session, strict: bool, mode: OutputMode) -> anyhow::Result<()> {
    let load = &session.load_warnings;
    let build = session.bundle.warnings();
    let total = load.len() + build.len();

    if mode == OutputMode::Json {
        display::print_json(&CheckOutput {
            load: load.iter().map(ToString::to_string).collect(),
            build,
        })?;
    } else if total == 0 {
        println!("{}", "No problems found.".green());
    } else {
        for warning in load {
            println!("  {} {warning}", "input".yellow().bold());
        }
        for warning in build {
            println!("  {} {warning}", warning.kind().yellow().bold());
        }
        println!();
        println!("{} warnings", total.to_string().yellow().bold());
    }

    if strict && total > 0 {
        anyhow::bail!("{total} warnings found in strict mode");
    }
    Ok(())
}
