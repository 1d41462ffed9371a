//! Recommendation service client.
//!
//! POSTs a [`RecommendationRequest`] and returns the ranked identifiers.
//! A ranking whose length differs from the candidate count is accepted and
//! reported as a [`CardinalityMismatch`], never as an error.

use std::time::Duration;

use panel_search::CandidateId;

use crate::error::RecommenderError;
use crate::observer::CardinalityMismatch;
use crate::request::RecommendationRequest;

/// A ranking returned by the recommendation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingOutcome {
    /// Ranked ids, best first, exactly as returned.
    pub ranking: Vec<CandidateId>,
    /// Set when the ranking does not cover the candidates one-to-one.
    pub mismatch: Option<CardinalityMismatch>,
}

impl RankingOutcome {
    /// Wrap a ranking, recording a mismatch against `expected` candidates.
    pub fn new(ranking: Vec<CandidateId>, expected: usize) -> Self {
        let mismatch = (ranking.len() != expected).then_some(CardinalityMismatch {
            expected,
            returned: ranking.len(),
        });
        Self { ranking, mismatch }
    }
}

/// A service that ranks candidates.
///
/// All implementations must be `Send + Sync` for concurrent pipeline use.
pub trait RecommendationService: Send + Sync {
    /// Rank the request's candidates.
    ///
    /// # Errors
    ///
    /// Returns [`RecommenderError`] if the service cannot be reached, answers
    /// with a non-200 status, or omits the ranking.
    fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> impl std::future::Future<Output = Result<RankingOutcome, RecommenderError>> + Send;
}

/// HTTP client for the recommendation service.
#[derive(Debug, Clone)]
pub struct RecommenderClient {
    endpoint: String,
    client: reqwest::Client,
}

impl RecommenderClient {
    /// Create a client POSTing to `endpoint` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RecommenderError::Connection`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, RecommenderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RecommenderError::Connection {
                message: format!("failed to build HTTP client: {e}"),
                source: e,
            })?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RecommendationService for RecommenderClient {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RankingOutcome, RecommenderError> {
        tracing::trace!(
            endpoint = %self.endpoint(),
            panel = %request.panel_id,
            engine = %request.engine_version,
            candidates = request.candidates.len(),
            "recommender request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| RecommenderError::Connection {
                message: format!("recommender request failed: {e}"),
                source: e,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| RecommenderError::Connection {
            message: format!("recommender response read failed: {e}"),
            source: e,
        })?;

        if status != reqwest::StatusCode::OK {
            return Err(RecommenderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let ranking = parse_recommendations(&body)?;
        let outcome = RankingOutcome::new(ranking, request.candidates.len());
        if let Some(mismatch) = outcome.mismatch {
            tracing::warn!(
                expected = mismatch.expected,
                returned = mismatch.returned,
                "not all candidates were returned by sort by relevance"
            );
        }
        Ok(outcome)
    }
}

/// Extract the `recommendations` array from a 200 response body.
fn parse_recommendations(body: &str) -> Result<Vec<CandidateId>, RecommenderError> {
    let mut value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| RecommenderError::Malformed(format!("response is not JSON: {e}")))?;

    let recommendations = value
        .get_mut("recommendations")
        .map(serde_json::Value::take)
        .ok_or_else(|| RecommenderError::Malformed("no recommendations provided".into()))?;

    serde_json::from_value(recommendations)
        .map_err(|e| RecommenderError::Malformed(format!("invalid recommendations: {e}")))
}
