//! Diagnostic hooks for pipeline callers.
//!
//! The pipeline stays free of debug output. Callers that want to see the
//! outgoing request or partial rankings inject a [`RankObserver`].

use crate::request::RecommendationRequest;

/// The recommendation service ranked a different number of ids than it was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardinalityMismatch {
    /// Number of candidates sent.
    pub expected: usize,
    /// Number of ids returned.
    pub returned: usize,
}

/// Observer of pipeline diagnostics. All methods default to no-ops.
pub trait RankObserver: Send + Sync {
    /// Called with every request just before it is sent.
    fn on_request(&self, _request: &RecommendationRequest) {}

    /// Called when a ranking's length differs from the candidate count.
    fn on_cardinality_mismatch(&self, _mismatch: &CardinalityMismatch) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RankObserver for NoopObserver {}

/// Observer that dumps outgoing requests at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TracingObserver {
    /// The request body exactly as it goes on the wire.
    fn request_body(request: &RecommendationRequest) -> serde_json::Result<String> {
        serde_json::to_string(request)
    }
}

impl RankObserver for TracingObserver {
    fn on_request(&self, request: &RecommendationRequest) {
        match Self::request_body(request) {
            Ok(body) => tracing::debug!(%body, "recommendation request"),
            Err(e) => tracing::debug!(error = %e, "recommendation request not serializable"),
        }
    }
}
