//! Error types for the panel-search crate.
//!
//! Messages are stable strings suitable for diagnostics. Query text never
//! appears in error messages.

use crate::types::Panel;

/// Errors that can occur while collecting ranking candidates.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The requested panel cannot be sorted by relevance.
    #[error("sorting by relevance is not supported for panel: {0}")]
    UnsupportedPanel(Panel),

    /// The search backend was unreachable or reported a failure.
    #[error("search retrieve failed: {0}")]
    Retrieve(String),

    /// The search backend answered successfully but with zero documents.
    #[error("search results are empty: {0}")]
    EmptyResults(String),

    /// A returned document could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration or input.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for panel-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
