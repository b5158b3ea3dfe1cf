//! Common display utilities for CLI commands.

use std::collections::BTreeSet;
use std::io::{self, Write};

use colored::Colorize;
use reqgraph::{AnalysisBundle, RequirementId};
use serde::Serialize;

const MAX_DISPLAY_ITEMS: usize = 50;

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{json}")
}

/// Colour a priority tier by urgency.
pub fn colorize_priority(priority: &str) -> String {
    if priority.contains("P0") {
        priority.red().bold().to_string()
    } else if priority.contains("P1") {
        priority.yellow().to_string()
    } else {
        priority.to_string()
    }
}

/// Bulleted list of requirements with their summary, truncated after
/// `MAX_DISPLAY_ITEMS` entries.
pub fn print_requirements(bundle: &AnalysisBundle, ids: &BTreeSet<RequirementId>, empty_message: &str) {
    if ids.is_empty() {
        println!("    {}", empty_message.dimmed());
        return;
    }

    for id in ids.iter().take(MAX_DISPLAY_ITEMS) {
        let summary = bundle
            .graph()
            .requirement(id.as_str())
            .map(|r| r.summary.as_str())
            .unwrap_or_default();
        let marker = if bundle.in_cycle(id.as_str()).unwrap_or(false) {
            "↻".red().to_string()
        } else {
            "•".dimmed().to_string()
        };
        println!("    {marker} {} {}", id.as_str().cyan(), summary.dimmed());
    }

    if ids.len() > MAX_DISPLAY_ITEMS {
        println!(
            "    {} ... and {} more",
            "•".dimmed(),
            ids.len() - MAX_DISPLAY_ITEMS
        );
    }
}
