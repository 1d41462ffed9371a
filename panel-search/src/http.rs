//! Shared HTTP client for search backend requests.

use crate::config::SearchConfig;
use crate::error::SearchError;
use std::time::Duration;

/// User-Agent sent when the configuration does not override it.
pub const DEFAULT_USER_AGENT: &str = concat!("panel-search/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] configured for the search backend.
///
/// The client has:
/// - Timeout from config (a timed-out query is a retrieve failure)
/// - Configured or default User-Agent
/// - gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .build()
        .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_client_with_default_config() {
        let client = build_client(&SearchConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn build_client_with_custom_ua() {
        let config = SearchConfig {
            user_agent: Some("PanelBot/1.0".into()),
            ..Default::default()
        };
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn default_user_agent_names_crate() {
        assert!(DEFAULT_USER_AGENT.starts_with("panel-search/"));
    }
}
