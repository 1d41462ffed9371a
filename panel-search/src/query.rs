//! Solr select query construction.
//!
//! Filter clauses supplied by the caller are copied, never appended to in
//! place, so a shared filter list can back many concurrent queries.

use crate::types::Panel;

/// Filter clause that keeps everything except data sources.
pub const EXCLUDE_DATA_SOURCES: &str = r#"-type:"data source""#;

/// Sort order for candidate retrieval. Deterministic across identical queries.
pub const CANDIDATE_SORT: &str = "id desc";

/// A single select query against the search backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolrQuery {
    /// Free-text query.
    pub q: String,
    /// Query-field weighting, e.g. `title^100 description^10`.
    pub qf: String,
    /// Filter clauses.
    pub fq: Vec<String>,
    /// Sort specifications.
    pub sort: Vec<String>,
    /// Maximum number of documents to return.
    pub rows: usize,
}

impl SolrQuery {
    /// Build the candidate query for a panel.
    ///
    /// The panel's type filter is added on top of a copy of `filters`.
    /// Callers must reject [`Panel::DataSource`] before calling this.
    pub fn for_panel(panel: Panel, q: &str, qf: &str, filters: &[String], rows: usize) -> Self {
        let mut fq = filters.to_vec();
        fq.push(panel_filter(panel));
        Self {
            q: q.to_owned(),
            qf: qf.to_owned(),
            fq,
            sort: vec![CANDIDATE_SORT.to_owned()],
            rows,
        }
    }

    /// Flatten into query-string pairs. `fq` is repeated once per clause.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.q.clone()),
            ("qf", self.qf.clone()),
            ("defType", "edismax".to_owned()),
            ("wt", "json".to_owned()),
            ("rows", self.rows.to_string()),
        ];
        if !self.sort.is_empty() {
            params.push(("sort", self.sort.join(",")));
        }
        params.extend(self.fq.iter().map(|f| ("fq", f.clone())));
        params
    }
}

/// The type filter clause for a panel.
fn panel_filter(panel: Panel) -> String {
    match panel {
        Panel::All => EXCLUDE_DATA_SOURCES.to_owned(),
        other => format!(r#"type:("{}")"#, other.as_str()),
    }
}
