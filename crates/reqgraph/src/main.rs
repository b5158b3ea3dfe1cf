//! Reqgraph CLI - structural queries over a requirement list.
//!
//! Reads a JSON Lines requirement list, builds the dependency graph once and
//! answers a single query per invocation.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{FilterArgs, OutputMode, Session};

/// Reqgraph: dependency graphs over requirement lists.
#[derive(Parser)]
#[command(name = "reqgraph")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Requirement list, one JSON object per line
    #[arg(short, long, global = true, default_value = "requirements.jsonl")]
    input: PathBuf,

    /// Configuration file (defaults to ./reqgraph.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show graph statistics
    Stats,

    /// Show everything known about one requirement
    Show {
        /// Requirement identifier (case-insensitive)
        id: String,
    },

    /// List a requirement and everything it transitively depends on
    Ancestors {
        /// Requirement identifier (case-insensitive)
        id: String,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List a requirement and everything that transitively depends on it
    Descendants {
        /// Requirement identifier (case-insensitive)
        id: String,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List a requirement and its direct dependencies and dependents
    Neighbors {
        /// Requirement identifier (case-insensitive)
        id: String,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List requirements matching attribute constraints
    Filter {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Detect circular dependencies
    Cycles,

    /// Report data-quality warnings in the requirement list
    Check {
        /// Exit with failure if any warning is found
        #[arg(long)]
        strict: bool,
    },

    /// Export nodes, edges, ancestry and cycles as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    let result = match Session::open(&cli.input, cli.config.as_deref()).await {
        Ok(session) => run(&session, cli.command, mode).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            for cause in e.chain().skip(1) {
                eprintln!("  {}: {cause}", "caused by".dimmed());
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(session: &Session, command: Commands, mode: OutputMode) -> anyhow::Result<()> {
    match command {
        Commands::Stats => cli::stats::run(session, mode),
        Commands::Show { id } => cli::show::run(session, &id, mode),
        Commands::Ancestors { id, filter } => {
            cli::query::run(session, cli::query::Relation::Ancestors, &id, &filter, mode)
        }
        Commands::Descendants { id, filter } => {
            cli::query::run(session, cli::query::Relation::Descendants, &id, &filter, mode)
        }
        Commands::Neighbors { id, filter } => {
            cli::query::run(session, cli::query::Relation::Neighbors, &id, &filter, mode)
        }
        Commands::Filter { filter } => cli::filter::run(session, &filter, mode),
        Commands::Cycles => cli::cycles::run(session, mode),
        Commands::Check { strict } => cli::check::run(session, strict, mode),
        Commands::Export { output } => cli::export::run(session, output.as_deref()).await,
    }
}
