//! Candidate collection: one backend query, partitioned by content type.

use crate::backend::SearchBackend;
use crate::error::SearchError;
use crate::query::SolrQuery;
use crate::types::{CandidateBucket, Document, Panel};

/// Candidates for one query together with the documents they came from.
#[derive(Debug, Clone)]
pub struct Collected {
    /// Candidate ids partitioned by content type.
    pub bucket: CandidateBucket,
    /// Every retrieved document, in backend order.
    pub documents: Vec<Document>,
}

/// Query the backend for a panel and bucket the results.
///
/// # Pipeline
///
/// 1. Reject [`Panel::DataSource`]
/// 2. Build the select query on a copy of `filters` with the panel's type filter
/// 3. Run it against `backend`
/// 4. Fail on zero documents
/// 5. Partition document ids by content type
///
/// # Errors
///
/// - [`SearchError::UnsupportedPanel`] for the data-source panel
/// - [`SearchError::Retrieve`] / [`SearchError::Parse`] from the backend
/// - [`SearchError::EmptyResults`] when the query matched nothing
/// - [`SearchError::Parse`] when a service id is not an integer
pub async fn collect_candidates<B: SearchBackend>(
    backend: &B,
    panel: Panel,
    q: &str,
    qf: &str,
    filters: &[String],
    max_rows: usize,
) -> Result<Collected, SearchError> {
    if panel == Panel::DataSource {
        return Err(SearchError::UnsupportedPanel(panel));
    }

    let query = SolrQuery::for_panel(panel, q, qf, filters, max_rows);
    let documents = backend.select(&query).await?;

    if documents.is_empty() {
        return Err(SearchError::EmptyResults(format!("no documents for panel {panel}")));
    }

    let bucket = partition(&documents)?;
    tracing::debug!(%panel, documents = documents.len(), candidates = bucket.len(), "candidates collected");

    Ok(Collected { bucket, documents })
}

/// Partition document ids into a [`CandidateBucket`].
///
/// Service ids become integers; every other type keeps its string id.
/// Documents of a type that cannot be ranked are skipped with a warning.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if a service document's id is not an integer.
pub fn partition(documents: &[Document]) -> Result<CandidateBucket, SearchError> {
    let mut bucket = CandidateBucket::new();
    for doc in documents {
        match (doc.content_type(), doc.candidate_id()?) {
            (Some(content_type), Some(id)) => bucket.push(content_type, id),
            _ => {
                tracing::warn!(id = %doc.id, doc_type = %doc.doc_type, "skipping document of unrankable type");
            }
        }
    }
    Ok(bucket)
}
