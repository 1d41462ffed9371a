//! Core types for panels, content types, candidates and documents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// A content type that can be ranked by relevance.
///
/// Data sources are deliberately absent: they are never bucketed or ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    /// Research datasets.
    Dataset,
    /// Publications (articles, papers, books).
    Publication,
    /// Research software.
    Software,
    /// Other research products.
    Other,
    /// Training resources.
    Training,
    /// Marketplace services. Identified by integer ids downstream.
    Service,
}

impl ContentType {
    /// All rankable content types in bucket iteration order.
    ///
    /// This order breaks ties when the "all" panel picks its largest bucket.
    pub const ALL: [ContentType; 6] = [
        Self::Dataset,
        Self::Publication,
        Self::Software,
        Self::Other,
        Self::Training,
        Self::Service,
    ];

    /// The identifier used in search documents and panel names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dataset => "dataset",
            Self::Publication => "publication",
            Self::Software => "software",
            Self::Other => "other",
            Self::Training => "training",
            Self::Service => "service",
        }
    }

    /// The panel name the recommendation service expects for this type.
    pub fn recommender_panel(&self) -> &'static str {
        match self {
            Self::Dataset => "datasets",
            Self::Publication => "publications",
            Self::Software => "software",
            Self::Other => "other_research_product",
            Self::Training => "trainings",
            Self::Service => "services",
        }
    }

    /// Look up a content type by its document `type` value.
    pub fn from_document_type(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    fn index(self) -> usize {
        match self {
            Self::Dataset => 0,
            Self::Publication => 1,
            Self::Software => 2,
            Self::Other => 3,
            Self::Training => 4,
            Self::Service => 5,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A panel of search results a client may ask to have sorted by relevance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Panel {
    /// Data sources. Not supported for relevance sorting.
    DataSource,
    /// The aggregate panel over every rankable content type.
    All,
    /// A single content-type panel.
    Content(ContentType),
}

impl Panel {
    /// The panel identifier as used in URLs and filter clauses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataSource => "data-source",
            Self::All => "all",
            Self::Content(t) => t.as_str(),
        }
    }

    /// Returns the content type when this is a single-type panel.
    pub fn content_type(&self) -> Option<ContentType> {
        match self {
            Self::Content(t) => Some(*t),
            Self::DataSource | Self::All => None,
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Panel {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data-source" => Ok(Self::DataSource),
            "all" => Ok(Self::All),
            other => ContentType::from_document_type(other)
                .map(Self::Content)
                .ok_or_else(|| SearchError::Config(format!("unknown panel: {other}"))),
        }
    }
}

impl TryFrom<String> for Panel {
    type Error = SearchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Panel> for String {
    fn from(panel: Panel) -> Self {
        panel.as_str().to_owned()
    }
}

impl From<ContentType> for Panel {
    fn from(t: ContentType) -> Self {
        Self::Content(t)
    }
}

/// An identifier eligible to be ranked by the recommendation service.
///
/// Services are sent as integers, every other type keeps its native string id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateId {
    /// Integer id (services).
    Int(i64),
    /// Native string id.
    Str(String),
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CandidateId {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<i64> for CandidateId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

/// A search document. Only `id` and `type` are interpreted; everything else
/// is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier.
    pub id: String,
    /// Content type name as stored in the index.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Remaining document fields.
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl Document {
    /// Create a document with an empty payload.
    pub fn new(id: impl Into<String>, doc_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            doc_type: doc_type.into(),
            payload: serde_json::Map::new(),
        }
    }

    /// The rankable content type of this document, if it has one.
    pub fn content_type(&self) -> Option<ContentType> {
        ContentType::from_document_type(&self.doc_type)
    }

    /// The id this document is sent to and ranked by the recommender as.
    ///
    /// Services use their integer id, every other rankable type its string
    /// id. Returns `Ok(None)` for documents of an unrankable type.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if a service document's id is not an integer.
    pub fn candidate_id(&self) -> Result<Option<CandidateId>, SearchError> {
        match self.content_type() {
            None => Ok(None),
            Some(ContentType::Service) => self
                .id
                .trim()
                .parse::<i64>()
                .map(|n| Some(CandidateId::Int(n)))
                .map_err(|_| {
                    SearchError::Parse(format!("service id is not an integer: {}", self.id))
                }),
            Some(_) => Ok(Some(CandidateId::Str(self.id.clone()))),
        }
    }
}

/// Candidate identifiers partitioned by content type.
///
/// Every rankable content type is always present; unused types are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateBucket {
    slots: [Vec<CandidateId>; 6],
}

impl CandidateBucket {
    /// Create a bucket with every content type empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidates for one content type, in retrieval order.
    pub fn get(&self, content_type: ContentType) -> &[CandidateId] {
        &self.slots[content_type.index()]
    }

    /// Append a candidate to its content type's sequence.
    pub fn push(&mut self, content_type: ContentType, id: CandidateId) {
        self.slots[content_type.index()].push(id);
    }

    /// Remove and return the candidates for one content type.
    pub fn take(&mut self, content_type: ContentType) -> Vec<CandidateId> {
        std::mem::take(&mut self.slots[content_type.index()])
    }

    /// Iterate `(type, candidates)` pairs in [`ContentType::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (ContentType, &[CandidateId])> {
        ContentType::ALL.into_iter().map(move |t| (t, self.get(t)))
    }

    /// Total number of candidates across all types.
    pub fn len(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    /// Whether every content type is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }

    /// The content type with the most candidates.
    ///
    /// Ties go to the earliest type in [`ContentType::ALL`]. Returns `None`
    /// when every type is empty.
    pub fn largest(&self) -> Option<ContentType> {
        let mut best: Option<(ContentType, usize)> = None;
        for (t, ids) in self.iter() {
            if ids.is_empty() {
                continue;
            }
            match best {
                Some((_, len)) if len >= ids.len() => {}
                _ => best = Some((t, ids.len())),
            }
        }
        best.map(|(t, _)| t)
    }
}
