//! Document re-ranking by an external ranking.

use std::collections::HashMap;

use panel_search::{CandidateId, Document};

/// Reorder `documents` by `ranking`.
///
/// For each ranked id, in order, the first document with that id is emitted.
/// Integer ids match service documents only; string ids match any document.
/// Ids with no document are skipped and documents absent from the ranking
/// are dropped, so the output is never longer than either input. Applying
/// the same ranking to the output returns it unchanged.
pub fn sort_documents(ranking: &[CandidateId], documents: &[Document]) -> Vec<Document> {
    let mut by_key: HashMap<CandidateId, usize> = HashMap::with_capacity(documents.len());
    for (idx, doc) in documents.iter().enumerate() {
        by_key.entry(CandidateId::Str(doc.id.clone())).or_insert(idx);
        // Integer ids only ever name services.
        if let Ok(Some(id @ CandidateId::Int(_))) = doc.candidate_id() {
            by_key.entry(id).or_insert(idx);
        }
    }

    // A document is emitted at most once even if the ranking repeats its id.
    let mut emitted = vec![false; documents.len()];
    let mut sorted = Vec::with_capacity(ranking.len().min(documents.len()));
    for id in ranking {
        if let Some(&idx) = by_key.get(id) {
            if !emitted[idx] {
                emitted[idx] = true;
                sorted.push(documents[idx].clone());
            }
        }
    }
    sorted
}
