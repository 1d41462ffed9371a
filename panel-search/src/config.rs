//! Search backend configuration with sensible defaults.
//!
//! [`SearchConfig`] points at a Solr core and bounds every candidate query.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Configuration for the search backend.
///
/// Use [`Default::default()`] for local development defaults, or construct
/// with field overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the Solr server, e.g. `http://localhost:8983/solr`.
    pub base_url: String,
    /// Collection holding every panel's documents.
    pub collection: String,
    /// Maximum number of documents retrieved for relevance sorting.
    pub max_rows: usize,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, the crate name and version are sent.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8983/solr".into(),
            collection: "all_collection".into(),
            max_rows: 1000,
            timeout_seconds: 8,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` must be an absolute `http`/`https` URL with a host
    /// - `collection` must not be empty
    /// - `max_rows` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        let base = url::Url::parse(&self.base_url)
            .map_err(|e| SearchError::Config(format!("invalid base_url: {e}")))?;
        if !matches!(base.scheme(), "http" | "https") || !base.has_host() {
            return Err(SearchError::Config(format!(
                "invalid base_url: {} is not an http(s) URL with a host",
                self.base_url
            )));
        }
        if self.collection.trim().is_empty() {
            return Err(SearchError::Config("collection must not be empty".into()));
        }
        if self.max_rows == 0 {
            return Err(SearchError::Config(
                "max_rows must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// The select endpoint of the configured collection.
    pub fn select_url(&self) -> String {
        format!(
            "{}/{}/select",
            self.base_url.trim_end_matches('/'),
            self.collection
        )
    }
}
