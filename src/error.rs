//! Error types for the relevance pipeline.
//!
//! Each [`RankError`] carries a stable error code (SCREAMING_SNAKE_CASE)
//! accessible via [`RankError::code()`]. Codes are part of the public API
//! contract and will not change.

use panel_search::SearchError;

/// Stable error codes for programmatic error handling.
pub mod error_codes {
    /// The requested panel cannot be sorted by relevance.
    pub const UNSUPPORTED_PANEL: &str = "UNSUPPORTED_PANEL";

    /// The search backend failed or could not be reached.
    pub const SEARCH_RETRIEVE_FAILED: &str = "SEARCH_RETRIEVE_FAILED";

    /// The search backend returned no documents.
    pub const EMPTY_RESULTS: &str = "EMPTY_RESULTS";

    /// A search document could not be interpreted.
    pub const SEARCH_PARSE_FAILED: &str = "SEARCH_PARSE_FAILED";

    /// The recommendation service could not be reached.
    pub const RECOMMENDER_CONNECTION: &str = "RECOMMENDER_CONNECTION";

    /// The recommendation service answered with a non-200 status.
    pub const RECOMMENDER_STATUS: &str = "RECOMMENDER_STATUS";

    /// The recommendation service answered without a usable ranking.
    pub const RECOMMENDER_MALFORMED: &str = "RECOMMENDER_MALFORMED";

    /// The "all" panel had no candidates in any content type.
    pub const NO_CANDIDATES: &str = "NO_CANDIDATES";

    /// Invalid or missing configuration.
    pub const CONFIG_INVALID: &str = "CONFIG_INVALID";
}

/// Failures talking to the recommendation service.
#[derive(Debug, thiserror::Error)]
pub enum RecommenderError {
    /// The request could not be delivered: connection refused, DNS failure,
    /// or timeout.
    #[error("recommender connection error: {message}")]
    Connection {
        /// Human-readable description including the transport message.
        message: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a status other than 200.
    #[error("recommender server status error: HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, kept for diagnostics.
        body: String,
    },

    /// The service answered 200 without a usable `recommendations` array.
    #[error("recommender response malformed: {0}")]
    Malformed(String),
}

impl RecommenderError {
    /// HTTP status of an upstream status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Connection { .. } | Self::Malformed(_) => None,
        }
    }
}

/// Errors produced by a relevance pipeline invocation.
#[derive(Debug, thiserror::Error)]
pub enum RankError {
    /// Candidate collection failed.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// The recommendation call failed.
    #[error(transparent)]
    Recommender(#[from] RecommenderError),

    /// The "all" panel had nothing to rank.
    #[error("no candidates to rank: {0}")]
    NoCandidates(String),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl RankError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Search(SearchError::UnsupportedPanel(_)) => error_codes::UNSUPPORTED_PANEL,
            Self::Search(SearchError::Retrieve(_)) => error_codes::SEARCH_RETRIEVE_FAILED,
            Self::Search(SearchError::EmptyResults(_)) => error_codes::EMPTY_RESULTS,
            Self::Search(SearchError::Parse(_)) => error_codes::SEARCH_PARSE_FAILED,
            Self::Search(SearchError::Config(_)) | Self::Config(_) => error_codes::CONFIG_INVALID,
            Self::Recommender(RecommenderError::Connection { .. }) => {
                error_codes::RECOMMENDER_CONNECTION
            }
            Self::Recommender(RecommenderError::Status { .. }) => error_codes::RECOMMENDER_STATUS,
            Self::Recommender(RecommenderError::Malformed(_)) => {
                error_codes::RECOMMENDER_MALFORMED
            }
            Self::NoCandidates(_) => error_codes::NO_CANDIDATES,
        }
    }

    /// Returns true if this error represents a transient upstream failure.
    ///
    /// Retryable errors include:
    /// - Search backend retrieval failures
    /// - Recommender connection failures and timeouts
    /// - Recommender rate limits (429) and server errors (5xx)
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Search(SearchError::Retrieve(_)) => true,
            Self::Recommender(RecommenderError::Connection { .. }) => true,
            Self::Recommender(RecommenderError::Status { status, .. }) => {
                *status == 429 || *status >= 500
            }
            _ => false,
        }
    }
}

/// Convenience alias for pipeline results.
pub type Result<T> = std::result::Result<T, RankError>;

#[cfg(test)]
mod tests {
    use super::*;
    use panel_search::Panel;

    #[test]
    fn search_errors_keep_their_message() {
        let err = RankError::from(SearchError::EmptyResults("no documents for panel all".into()));
        assert_eq!(err.to_string(), "search results are empty: no documents for panel all");
        assert_eq!(err.code(), "EMPTY_RESULTS");
    }

    #[test]
    fn unsupported_panel_code() {
        let err = RankError::from(SearchError::UnsupportedPanel(Panel::DataSource));
        assert_eq!(err.code(), "UNSUPPORTED_PANEL");
        assert!(!err.is_retryable());
    }

    #[test]
    fn status_error_carries_code_and_body() {
        let err = RecommenderError::Status {
            status: 503,
            body: "maintenance".into(),
        };
        assert_eq!(err.status(), Some(503));
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("maintenance"));

        let err = RankError::from(err);
        assert_eq!(err.code(), "RECOMMENDER_STATUS");
        assert!(err.is_retryable());
    }

    #[test]
    fn client_status_errors_are_not_retryable() {
        let err = RankError::from(RecommenderError::Status {
            status: 422,
            body: String::new(),
        });
        assert!(!err.is_retryable());
    }

    #[test]
    fn malformed_code() {
        let err = RankError::from(RecommenderError::Malformed("no recommendations provided".into()));
        assert_eq!(err.code(), "RECOMMENDER_MALFORMED");
        assert!(err.to_string().contains("no recommendations provided"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn no_candidates_and_config_codes() {
        assert_eq!(RankError::NoCandidates("all".into()).code(), "NO_CANDIDATES");
        assert_eq!(RankError::Config("x".into()).code(), "CONFIG_INVALID");
        assert_eq!(
            RankError::from(SearchError::Config("x".into())).code(),
            "CONFIG_INVALID"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RankError>();
    }
}
