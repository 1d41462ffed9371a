//! # panel-search
//!
//! Candidate collection for relevance-sorted search panels.
//!
//! This crate queries the search backend once per request and turns the
//! returned documents into per-content-type candidate buckets that a
//! recommendation service can rank.
//!
//! ## Design
//!
//! - One Solr select per request, sorted by `id desc` and capped at `max_rows`
//! - Caller filter clauses are copied before the panel filter is added
//! - Buckets are fixed-shape: every rankable content type is always present
//! - Service ids are sent as integers, every other type as strings
//! - An empty result set is an error, distinct from a backend failure

pub mod backend;
pub mod collector;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod types;

pub use backend::{SearchBackend, SolrBackend};
pub use collector::{collect_candidates, Collected};
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use query::SolrQuery;
pub use types::{CandidateBucket, CandidateId, ContentType, Document, Panel};

/// Collect candidates for a panel from a Solr backend built from `config`.
///
/// Convenience wrapper around [`collect_candidates`] that constructs a
/// [`SolrBackend`] for the single call.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for an invalid configuration, otherwise
/// the same errors as [`collect_candidates`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> panel_search::Result<()> {
/// use panel_search::{Panel, SearchConfig};
///
/// let config = SearchConfig::default();
/// let collected = panel_search::collect(&config, Panel::All, "ocean", "title", &[]).await?;
/// println!("{} documents", collected.documents.len());
/// # Ok(())
/// # }
/// ```
pub async fn collect(
    config: &SearchConfig,
    panel: Panel,
    q: &str,
    qf: &str,
    filters: &[String],
) -> Result<Collected> {
    let backend = SolrBackend::new(config)?;
    collect_candidates(&backend, panel, q, qf, filters, config.max_rows).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn collect_validates_config() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = collect(&config, Panel::All, "*", "title", &[]).await.unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[tokio::test]
    async fn collect_rejects_data_source_panel() {
        let err = collect(&SearchConfig::default(), Panel::DataSource, "*", "title", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::UnsupportedPanel(_)));
    }
}
