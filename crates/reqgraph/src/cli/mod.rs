//! CLI command implementations.

mod display;

pub mod check;
pub mod cycles;
pub mod export;
pub mod filter;
pub mod query;
pub mod show;
pub mod stats;

pub use display::OutputMode;

use std::path::Path;

use anyhow::Context;
use clap::Args;
use reqgraph::{AnalysisBundle, AttributeFilter, Error, ReqgraphConfig, RequirementId, RequirementQueries};

/// Attribute constraints shared by the query commands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only requirements in this area
    #[arg(long)]
    pub area: Option<String>,

    /// Only requirements with this priority tier
    #[arg(long)]
    pub priority: Option<String>,

    /// Only requirements targeting this version
    #[arg(long = "target-version", value_name = "VERSION")]
    pub version: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> AttributeFilter {
        AttributeFilter {
            area: self.area.clone(),
            priority: self.priority.clone(),
            version: self.version.clone(),
        }
    }
}

/// A loaded requirement list with its analysis.
pub struct Session {
    pub config: ReqgraphConfig,
    pub bundle: AnalysisBundle,
    pub load_warnings: Vec<reqgraph_jsonl::Warning>,
}

impl Session {
    /// Load configuration and input, then build and analyse the graph.
    pub async fn open(input: &Path, config: Option<&Path>) -> anyhow::Result<Self> {
        let config = ReqgraphConfig::discover(config)
            .await
            .context("failed to load configuration")?;
        let (records, load_warnings) = reqgraph::load_records(input)
            .await
            .with_context(|| format!("failed to read {}", input.display()))?;
        let bundle = AnalysisBundle::build(&records, &config)?;

        tracing::info!(
            input = %input.display(),
            records = records.len(),
            nodes = bundle.graph().node_count(),
            "Requirement graph ready"
        );

        Ok(Self {
            config,
            bundle,
            load_warnings,
        })
    }

    /// Fail unless `enabled`, naming the disabled feature.
    pub fn require(enabled: bool, feature: &str) -> Result<(), Error> {
        if enabled {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "the {feature} feature is disabled in the configuration"
            )))
        }
    }

    /// Canonical identifier for a command-line argument.
    pub fn resolve(&self, raw: &str) -> Result<RequirementId, Error> {
        self.bundle.resolve(raw)
    }
}
