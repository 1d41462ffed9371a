//! Panel resolution: which content type gets ranked, and by which engine.

use panel_search::{CandidateBucket, CandidateId, ContentType, Panel, SearchError};

use crate::config::EnginePolicy;
use crate::error::{RankError, Result};

/// The panel actually scored and the candidates sent for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPanel {
    /// Effective panel. Differs from the requested one only for "all".
    pub content_type: ContentType,
    /// Scoring engine selected for the effective panel.
    pub engine_version: String,
    /// Candidates of the effective panel, in retrieval order.
    pub candidates: Vec<CandidateId>,
}

/// Resolve the effective panel for a request.
///
/// A single-type panel resolves to itself. "all" resolves to the content type
/// with the most candidates, ties going to the first in
/// [`ContentType::ALL`] order; only that bucket is ranked.
///
/// # Errors
///
/// - [`SearchError::UnsupportedPanel`] for the data-source panel
/// - [`RankError::NoCandidates`] when "all" has every bucket empty
pub fn resolve_panel(
    requested: Panel,
    mut bucket: CandidateBucket,
    policy: &EnginePolicy,
) -> Result<ResolvedPanel> {
    let content_type = match requested {
        Panel::DataSource => return Err(SearchError::UnsupportedPanel(requested).into()),
        Panel::Content(t) => t,
        // TODO: send the whole bucket once the recommender accepts multi-type candidates.
        Panel::All => bucket.largest().ok_or_else(|| {
            RankError::NoCandidates("every content type is empty for panel all".into())
        })?,
    };

    let engine_version = policy.engine_for(content_type).to_owned();
    tracing::debug!(%requested, effective = %content_type, engine = %engine_version, "panel resolved");

    Ok(ResolvedPanel {
        content_type,
        engine_version,
        candidates: bucket.take(content_type),
    })
}
