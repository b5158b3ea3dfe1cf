//! `reqgraph export` command implementation.

use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use reqgraph::GraphExport;

use super::Session;

/// Run the export command, writing to `output` or stdout.
pub async fn run(session: &Session, output: Option<&Path>) -> anyhow::Result<()> {
    let export = GraphExport::from_bundle(&session.bundle, &session.config.features)?;
    let json = export.to_json_pretty()?;

    match output {
        Some(path) => {
            tokio::fs::write(path, json + "\n")
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "{} {} requirements to {}",
                "Exported".green().bold(),
                export.nodes.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
