//! Pipeline configuration.
//!
//! [`RankConfig`] holds the recommender endpoint, the engine policy table
//! and the search backend settings. It loads from TOML; missing fields fall
//! back to defaults.

use std::collections::BTreeMap;
use std::path::Path;

use panel_search::{ContentType, SearchConfig};
use serde::{Deserialize, Serialize};

use crate::error::{RankError, Result};

/// Scoring engine used for services.
pub const SERVICE_ENGINE: &str = "NCFRanking";

/// Scoring engine used for every other content type.
pub const CONTENT_ENGINE: &str = "content_visit_sort";

/// Which scoring engine the recommendation service applies per effective panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnginePolicy {
    /// Engine for content types without an override.
    pub default_engine: String,
    /// Per-content-type engine overrides.
    pub overrides: BTreeMap<ContentType, String>,
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self {
            default_engine: CONTENT_ENGINE.into(),
            overrides: BTreeMap::from([(ContentType::Service, SERVICE_ENGINE.to_owned())]),
        }
    }
}

impl EnginePolicy {
    /// The engine name for an effective panel.
    pub fn engine_for(&self, content_type: ContentType) -> &str {
        self.overrides
            .get(&content_type)
            .map_or(self.default_engine.as_str(), String::as_str)
    }

    fn validate(&self) -> Result<()> {
        if self.default_engine.trim().is_empty() {
            return Err(RankError::Config("default_engine must not be empty".into()));
        }
        if let Some((t, _)) = self.overrides.iter().find(|(_, e)| e.trim().is_empty()) {
            return Err(RankError::Config(format!("engine override for {t} is empty")));
        }
        Ok(())
    }
}

/// Configuration for the relevance pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Full URL the recommendation request is POSTed to.
    pub recommender_endpoint: String,
    /// Recommender request timeout in seconds.
    pub timeout_seconds: u64,
    /// Scoring engine selection.
    pub engines: EnginePolicy,
    /// Search backend settings.
    pub search: SearchConfig,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            recommender_endpoint: "http://localhost:8081/recommendations".into(),
            timeout_seconds: 5,
            engines: EnginePolicy::default(),
            search: SearchConfig::default(),
        }
    }
}

impl RankConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RankError::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&content).map_err(|e| RankError::Config(e.to_string()))
    }

    /// Validates this configuration and the nested search configuration.
    ///
    /// Checks:
    /// - `recommender_endpoint` must be an absolute `http`/`https` URL with a host
    /// - `timeout_seconds` must be greater than 0
    /// - engine names must not be empty
    pub fn validate(&self) -> Result<()> {
        let endpoint = url::Url::parse(&self.recommender_endpoint)
            .map_err(|e| RankError::Config(format!("invalid recommender_endpoint: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") || !endpoint.has_host() {
            return Err(RankError::Config(format!(
                "invalid recommender_endpoint: {} is not an http(s) URL with a host",
                self.recommender_endpoint
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(RankError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        self.engines.validate()?;
        self.search.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = RankConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    fn default_policy_maps_service_to_ncf() {
        let policy = EnginePolicy::default();
        assert_eq!(policy.engine_for(ContentType::Service), "NCFRanking");
        for t in ContentType::ALL.into_iter().filter(|t| *t != ContentType::Service) {
            assert_eq!(policy.engine_for(t), "content_visit_sort");
        }
    }

    #[test]
    fn policy_override_without_call_site_change() {
        let mut policy = EnginePolicy::default();
        policy
            .overrides
            .insert(ContentType::Training, "training_sort".into());
        assert_eq!(policy.engine_for(ContentType::Training), "training_sort");
        assert_eq!(policy.engine_for(ContentType::Dataset), "content_visit_sort");
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = RankConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn invalid_endpoint_rejected() {
        let config = RankConfig {
            recommender_endpoint: "not a url".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("recommender_endpoint"));
    }

    #[test]
    fn schemeless_endpoint_rejected() {
        let config = RankConfig {
            recommender_endpoint: "localhost:8081/recommendations".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), "CONFIG_INVALID");
        assert!(err.to_string().contains("recommender_endpoint"));
    }

    #[test]
    fn empty_engine_override_rejected() {
        let mut config = RankConfig::default();
        config.engines.overrides.insert(ContentType::Dataset, " ".into());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("dataset"));
    }

    #[test]
    fn nested_search_config_is_validated() {
        let mut config = RankConfig::default();
        config.search.max_rows = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), "CONFIG_INVALID");
    }

    #[test]
    fn from_file_reads_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
recommender_endpoint = "http://recommender:9080/recommendations"

[engines.overrides]
service = "NCFRanking"
software = "software_sort"

[search]
base_url = "http://solr:8983/solr"
max_rows = 300
"#
        )
        .unwrap();

        let config = RankConfig::from_file(file.path()).unwrap();
        assert_eq!(
            config.recommender_endpoint,
            "http://recommender:9080/recommendations"
        );
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.engines.default_engine, "content_visit_sort");
        assert_eq!(config.engines.engine_for(ContentType::Software), "software_sort");
        assert_eq!(config.search.max_rows, 300);
        assert_eq!(config.search.collection, "all_collection");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_file_nonexistent_returns_error() {
        let err = RankConfig::from_file(Path::new("/nonexistent/panel-rank.toml")).unwrap_err();
        assert_eq!(err.code(), "CONFIG_INVALID");
    }

    #[test]
    fn from_file_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_seconds = \"soon\"").unwrap();
        assert!(RankConfig::from_file(file.path()).is_err());
    }
}
