//! Reqgraph - dependency graphs over requirement lists.
//!
//! A requirement list is a set of records, each with an identifier such as
//! `RM-012` and a free-text dependency cell (`"RM-001, RM-004"`,
//! `"RM-001..RM-009"`, `"—"`). This crate turns such a list into a directed
//! graph and answers structural questions about it: what must be done
//! before a requirement, what depends on it, what its immediate neighbours
//! are and where the circular dependencies lie.
//!
//! The pipeline runs once per input snapshot:
//!
//! 1. [`DependencyParser`] turns dependency text into identifiers.
//! 2. [`GraphBuilder`] assembles the graph and collects [`BuildWarning`]s.
//! 3. [`AnalysisBundle`] computes levels, transitive closures and cycles.
//! 4. [`RequirementQueries`] answers queries from the bundle.
//!
//! ```
//! use reqgraph::{AnalysisBundle, ReqgraphConfig, RequirementQueries, RequirementRecord};
//!
//! let records = vec![
//!     RequirementRecord::new("RM-001"),
//!     RequirementRecord::new("RM-002").with_dependencies("RM-001"),
//! ];
//! let bundle = AnalysisBundle::build(&records, &ReqgraphConfig::default())?;
//!
//! assert_eq!(bundle.ancestors_of("RM-002")?.len(), 2);
//! # Ok::<(), reqgraph::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod analysis;
pub mod builder;
pub mod bundle;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod export;
pub mod graph;
pub mod load;
pub mod parser;
pub mod query;

pub use analysis::Cycle;
pub use builder::GraphBuilder;
pub use bundle::{AnalysisBundle, BundleHandle};
pub use config::{Features, ReqgraphConfig};
pub use diagnostics::BuildWarning;
pub use domain::{Requirement, RequirementId, RequirementRecord};
pub use error::{Error, Result};
pub use export::GraphExport;
pub use graph::{Edge, RequirementGraph};
pub use load::load_records;
pub use parser::DependencyParser;
pub use query::{
    AttributeFilter, CycleDiagnostics, FilterOptions, GraphSummary, NodeDetails,
    RequirementQueries,
};
