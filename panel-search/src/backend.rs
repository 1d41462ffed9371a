//! Search backend abstraction and its Solr implementation.

use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::query::SolrQuery;
use crate::types::Document;

/// A backend that answers select queries with documents.
///
/// All implementations must be `Send + Sync` so one backend can serve many
/// concurrent pipeline invocations.
pub trait SearchBackend: Send + Sync {
    /// Run a select query and return the matching documents in backend order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Retrieve`] if the backend is unreachable, times
    /// out, or answers with a non-success status, and [`SearchError::Parse`]
    /// if the response body is not a select response.
    fn select(
        &self,
        query: &SolrQuery,
    ) -> impl std::future::Future<Output = Result<Vec<Document>, SearchError>> + Send;
}

#[derive(Debug, Deserialize)]
struct SelectResponse {
    response: SelectDocs,
}

#[derive(Debug, Deserialize)]
struct SelectDocs {
    docs: Vec<Document>,
}

/// Solr select endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct SolrBackend {
    select_url: String,
    client: reqwest::Client,
}

impl SolrBackend {
    /// Create a backend for the configured collection.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            select_url: config.select_url(),
            client: http::build_client(config)?,
        })
    }
}

impl SearchBackend for SolrBackend {
    async fn select(&self, query: &SolrQuery) -> Result<Vec<Document>, SearchError> {
        tracing::trace!(q = %query.q, fq = ?query.fq, rows = query.rows, "solr select");

        let response = self
            .client
            .get(&self.select_url)
            .query(&query.to_params())
            .send()
            .await
            .map_err(|e| SearchError::Retrieve(format!("solr request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Retrieve(format!(
                "solr HTTP {}",
                status.as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Retrieve(format!("solr response read failed: {e}")))?;

        let parsed: SelectResponse = serde_json::from_str(&body)
            .map_err(|e| SearchError::Parse(format!("unexpected solr response: {e}")))?;

        tracing::trace!(count = parsed.response.docs.len(), "solr response received");
        Ok(parsed.response.docs)
    }
}
