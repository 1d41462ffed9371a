//! The relevance pipeline: collect, resolve, build, recommend, re-rank.
//!
//! One invocation runs two sequential network calls and shares no mutable
//! state with other invocations. Dropping the returned future aborts any
//! in-flight call.

use std::sync::Arc;
use std::time::Duration;

use panel_search::{collect_candidates, Document, Panel, SearchBackend, SolrBackend};

use crate::config::{EnginePolicy, RankConfig};
use crate::error::{RankError, Result};
use crate::observer::{NoopObserver, RankObserver};
use crate::recommender::{RecommendationService, RecommenderClient};
use crate::request::build_request;
use crate::rerank::sort_documents;
use crate::resolver::resolve_panel;
use crate::session::SessionContext;

/// A relevance-sorting pipeline over a search backend and a recommender.
pub struct RelevancePipeline<B, R> {
    backend: B,
    recommender: R,
    engines: EnginePolicy,
    max_rows: usize,
    observer: Arc<dyn RankObserver>,
}

impl<B, R> std::fmt::Debug for RelevancePipeline<B, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelevancePipeline")
            .field("engines", &self.engines)
            .field("max_rows", &self.max_rows)
            .finish_non_exhaustive()
    }
}

impl RelevancePipeline<SolrBackend, RecommenderClient> {
    /// Build a pipeline talking to Solr and the recommender over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::Config`] if the configuration is invalid.
    pub fn from_config(config: &RankConfig) -> Result<Self> {
        config.validate()?;
        let backend = SolrBackend::new(&config.search)?;
        let recommender = RecommenderClient::new(
            config.recommender_endpoint.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
        .map_err(|e| RankError::Config(e.to_string()))?;
        Ok(Self::new(
            backend,
            recommender,
            config.engines.clone(),
            config.search.max_rows,
        ))
    }
}

impl<B: SearchBackend, R: RecommendationService> RelevancePipeline<B, R> {
    /// Create a pipeline from its collaborators.
    pub fn new(backend: B, recommender: R, engines: EnginePolicy, max_rows: usize) -> Self {
        Self {
            backend,
            recommender,
            engines,
            max_rows,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Install a diagnostics observer.
    pub fn with_observer(mut self, observer: Arc<dyn RankObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Sort a panel's search results by relevance.
    ///
    /// # Pipeline
    ///
    /// 1. Query the search backend and bucket candidates by content type
    /// 2. Resolve the effective panel and its scoring engine
    /// 3. Build the recommendation request
    /// 4. Ask the recommender for a ranking (a partial ranking is tolerated)
    /// 5. Reorder the retrieved documents by that ranking
    ///
    /// # Errors
    ///
    /// Every stage's error is returned unmodified; see [`RankError`].
    pub async fn rank(
        &self,
        panel: Panel,
        query: &str,
        query_fields: &str,
        filters: &[String],
        session: Option<&SessionContext>,
    ) -> Result<Vec<Document>> {
        let collected = collect_candidates(
            &self.backend,
            panel,
            query,
            query_fields,
            filters,
            self.max_rows,
        )
        .await?;

        let resolved = resolve_panel(panel, collected.bucket, &self.engines)?;
        let request = build_request(&resolved, session);
        self.observer.on_request(&request);

        let outcome = self.recommender.recommend(&request).await?;
        if let Some(mismatch) = &outcome.mismatch {
            self.observer.on_cardinality_mismatch(mismatch);
        }

        let sorted = sort_documents(&outcome.ranking, &collected.documents);
        tracing::debug!(
            %panel,
            effective = %resolved.content_type,
            retrieved = collected.documents.len(),
            ranked = sorted.len(),
            "sort by relevance complete"
        );
        Ok(sorted)
    }
}
