//! Configuration for reqgraph.
//!
//! Configuration is read from a YAML file. Every field has a default, so an
//! empty file (or no file at all) yields a working configuration.
//!
//! ```yaml
//! id-prefix: RM
//! detail-max-chars: 300
//! max-cycles: 100
//! max-range-expansion: 10000
//! features:
//!   search: true
//!   filtering: true
//!   cycle-diagnostics: true
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "reqgraph.yaml";

/// Default length at which detail text is truncated
pub const DEFAULT_DETAIL_MAX_CHARS: usize = 300;

/// Default cap on the number of elementary cycles exposed
pub const DEFAULT_MAX_CYCLES: usize = 100;

/// Default cap on identifiers produced by a single range reference
pub const DEFAULT_MAX_RANGE_EXPANSION: usize = 10_000;

/// Configuration file structure for reqgraph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ReqgraphConfig {
    /// Literal identifier prefix (e.g. "RM"). `None` accepts any uppercase prefix.
    pub id_prefix: Option<String>,

    /// Detail text longer than this many characters is truncated
    pub detail_max_chars: usize,

    /// Maximum number of elementary cycles listed
    pub max_cycles: usize,

    /// Maximum number of identifiers a single range reference expands to
    pub max_range_expansion: usize,

    /// Interactive features enabled for this session
    pub features: Features,
}

/// Feature switches for the query surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Features {
    /// Node lookup and ancestor/descendant/neighborhood queries
    pub search: bool,

    /// Attribute filtering
    pub filtering: bool,

    /// Cycle listing
    pub cycle_diagnostics: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            search: true,
            filtering: true,
            cycle_diagnostics: true,
        }
    }
}

impl Default for ReqgraphConfig {
    fn default() -> Self {
        Self {
            id_prefix: None,
            detail_max_chars: DEFAULT_DETAIL_MAX_CHARS,
            max_cycles: DEFAULT_MAX_CYCLES,
            max_range_expansion: DEFAULT_MAX_RANGE_EXPANSION,
            features: Features::default(),
        }
    }
}

impl ReqgraphConfig {
    /// Parse and validate configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the YAML is invalid or fails validation.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Config`] if its content is invalid.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        Self::from_yaml_str(&content)
    }

    /// Resolve the configuration for a session.
    ///
    /// An explicit path must exist. Without one, [`CONFIG_FILE_NAME`] in the
    /// current directory is used if present, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be loaded.
    pub async fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "Loading configuration");
            return Self::load(path).await;
        }

        let default_path = Path::new(CONFIG_FILE_NAME);
        if fs::try_exists(default_path).await? {
            tracing::debug!(path = CONFIG_FILE_NAME, "Loading configuration");
            Self::load(default_path).await
        } else {
            tracing::debug!("No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Check the configuration for values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if let Some(prefix) = &self.id_prefix {
            if prefix.is_empty() {
                return Err(Error::Config("id-prefix cannot be empty".to_string()));
            }
            if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(Error::Config(format!(
                    "id-prefix must be alphanumeric, got '{prefix}'"
                )));
            }
        }
        if self.detail_max_chars == 0 {
            return Err(Error::Config(
                "detail-max-chars must be at least 1".to_string(),
            ));
        }
        if self.max_range_expansion == 0 {
            return Err(Error::Config(
                "max-range-expansion must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = ReqgraphConfig::from_yaml_str("").unwrap();
        assert_eq!(config, ReqgraphConfig::default());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = ReqgraphConfig::from_yaml_str("id-prefix: RM\nmax-cycles: 5\n").unwrap();

        assert_eq!(config.id_prefix.as_deref(), Some("RM"));
        assert_eq!(config.max_cycles, 5);
        assert_eq!(config.detail_max_chars, DEFAULT_DETAIL_MAX_CHARS);
        assert!(config.features.search);
    }

    #[test]
    fn features_can_be_disabled() {
        let config =
            ReqgraphConfig::from_yaml_str("features:\n  cycle-diagnostics: false\n").unwrap();

        assert!(!config.features.cycle_diagnostics);
        assert!(config.features.filtering);
    }

    #[rstest]
    #[case::empty_prefix("id-prefix: ''", "cannot be empty")]
    #[case::punctuated_prefix("id-prefix: 'R.M'", "alphanumeric")]
    #[case::zero_detail("detail-max-chars: 0", "detail-max-chars")]
    #[case::zero_range("max-range-expansion: 0", "max-range-expansion")]
    #[case::unknown_key("colour: red", "unknown field")]
    fn invalid_yaml_is_rejected(#[case] yaml: &str, #[case] expected: &str) {
        let err = ReqgraphConfig::from_yaml_str(yaml).unwrap_err();

        assert!(matches!(err, Error::Config(_)));
        assert!(
            err.to_string().contains(expected),
            "expected '{expected}' in '{err}'"
        );
    }

    #[tokio::test]
    async fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        tokio::fs::write(&path, "max-cycles: 3\n").await.unwrap();

        let config = ReqgraphConfig::load(&path).await.unwrap();

        assert_eq!(config.max_cycles, 3);
    }

    #[tokio::test]
    async fn discover_with_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");

        let err = ReqgraphConfig::discover(Some(&missing)).await.unwrap_err();

        assert!(matches!(err, Error::Io(_)));
    }
}
