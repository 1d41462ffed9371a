//! Recommendation request assembly.
//!
//! Building a request performs no I/O. The only non-determinism is the
//! current time and freshly generated identifiers.

use chrono::{DateTime, Utc};
use panel_search::CandidateId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resolver::ResolvedPanel;
use crate::session::SessionContext;

/// Body POSTed to the recommendation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Session identifier, or a fresh token for anonymous callers.
    pub unique_id: String,
    /// Request time, ISO-8601 UTC with millisecond precision and `Z` suffix.
    pub timestamp: String,
    /// Fresh token per request.
    pub visit_id: String,
    /// `/search/<effective panel>`.
    pub page_id: String,
    /// Recommender panel name of the effective panel.
    pub panel_id: String,
    /// Scoring engine to apply.
    pub engine_version: String,
    /// Identifiers to rank.
    pub candidates: Vec<CandidateId>,
    /// Reserved search context. Always empty.
    pub search_data: serde_json::Map<String, serde_json::Value>,
    /// Caller's user identifier, present only for a session.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub aai_uid: Option<String>,
}

/// Build the recommendation request for a resolved panel at the current time.
pub fn build_request(
    resolved: &ResolvedPanel,
    session: Option<&SessionContext>,
) -> RecommendationRequest {
    build_request_at(resolved, session, Utc::now())
}

/// Build the recommendation request for a resolved panel at `now`.
pub fn build_request_at(
    resolved: &ResolvedPanel,
    session: Option<&SessionContext>,
    now: DateTime<Utc>,
) -> RecommendationRequest {
    let unique_id = session.map_or_else(|| Uuid::new_v4().to_string(), |s| s.session_uuid.clone());

    RecommendationRequest {
        unique_id,
        timestamp: format_timestamp(now),
        visit_id: Uuid::new_v4().to_string(),
        page_id: format!("/search/{}", resolved.content_type),
        panel_id: resolved.content_type.recommender_panel().to_owned(),
        engine_version: resolved.engine_version.clone(),
        candidates: resolved.candidates.clone(),
        search_data: serde_json::Map::new(),
        aai_uid: session.map(|s| s.aai_id.clone()),
    }
}

/// `2024-03-01T09:15:02.123Z`
fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
