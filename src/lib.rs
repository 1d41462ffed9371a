//! # panel-rank
//!
//! Relevance sorting for search result panels.
//!
//! Raw candidates come from the search backend (see [`panel_search`]); the
//! ranking itself is delegated to an external recommendation service. This
//! crate decides what gets ranked and by which scoring engine, reconciles the
//! returned ranking against the retrieved documents, and fails fast with a
//! typed error when either upstream misbehaves.
//!
//! ## Pipeline
//!
//! 1. [`panel_search::collect_candidates`] — one search query, bucketed by content type
//! 2. [`resolver::resolve_panel`] — effective panel and engine variant
//! 3. [`request::build_request`] — recommendation request payload
//! 4. [`recommender::RecommendationService::recommend`] — the ranking
//! 5. [`rerank::sort_documents`] — documents in ranking order
//!
//! [`RelevancePipeline::rank`] runs all five.

pub mod config;
pub mod error;
pub mod observer;
pub mod pipeline;
pub mod recommender;
pub mod request;
pub mod rerank;
pub mod resolver;
pub mod session;

pub use config::{EnginePolicy, RankConfig};
pub use error::{RankError, RecommenderError, Result};
pub use observer::{CardinalityMismatch, NoopObserver, RankObserver, TracingObserver};
pub use panel_search::{CandidateId, ContentType, Document, Panel};
pub use pipeline::RelevancePipeline;
pub use recommender::{RankingOutcome, RecommendationService, RecommenderClient};
pub use request::RecommendationRequest;
pub use session::SessionContext;
