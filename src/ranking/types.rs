use serde::Serialize;
use serde_json::{Map, Value};

use crate::constants::{
    ADJUSTMENT_DISPLAY_PRECISION, CONTEXT_SEPARATOR, DEFAULT_DNF_PENALTY, DEFAULT_K,
    DEFAULT_RATING_BOOST, SCORE_DISPLAY_PRECISION, round_to,
};
use crate::metadata::BookMetadata;

/// One retrieval result from the vector index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// Text handed to the generation step.
    pub content: String,
    pub metadata: BookMetadata,
    /// Distance from the query; lower is more similar. Only comparable
    /// against scores from the same retrieval call.
    pub raw_score: f64,
}

impl Candidate {
    pub fn new(content: impl Into<String>, metadata: BookMetadata, raw_score: f64) -> Self {
        Self {
            content: content.into(),
            metadata,
            raw_score,
        }
    }
}

/// A [`Candidate`] annotated by the reranker.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    /// Signed delta applied to `raw_score`.
    pub adjustment: f64,
    /// `raw_score + adjustment`, full precision.
    pub adjusted_score: f64,
    /// Set on the single force-included abandoned match, if any.
    pub is_pinned: bool,
}

impl ScoredCandidate {
    /// Annotates a candidate with an adjustment.
    pub fn adjusted(candidate: Candidate, adjustment: f64) -> Self {
        let adjusted_score = candidate.raw_score + adjustment;
        Self {
            candidate,
            adjustment,
            adjusted_score,
            is_pinned: false,
        }
    }

    /// Wraps a candidate as the pinned entry. Its score is reported unadjusted.
    pub fn pinned(candidate: Candidate) -> Self {
        Self {
            adjusted_score: candidate.raw_score,
            candidate,
            adjustment: 0.0,
            is_pinned: true,
        }
    }

    pub fn content(&self) -> &str {
        &self.candidate.content
    }

    pub fn metadata(&self) -> &BookMetadata {
        &self.candidate.metadata
    }

    pub fn raw_score(&self) -> f64 {
        self.candidate.raw_score
    }

    /// Adjusted score rounded for display.
    pub fn display_score(&self) -> f64 {
        round_to(self.adjusted_score, SCORE_DISPLAY_PRECISION)
    }

    /// Raw score rounded for display.
    pub fn display_original_score(&self) -> f64 {
        round_to(self.candidate.raw_score, SCORE_DISPLAY_PRECISION)
    }

    /// Adjustment rounded for display.
    pub fn display_adjustment(&self) -> f64 {
        round_to(self.adjustment, ADJUSTMENT_DISPLAY_PRECISION)
    }

    /// Book metadata plus the ranking annotations, ready to render.
    ///
    /// Adds `adjustment`, `adjusted_score` (also as `rerank_score`),
    /// `original_score` and `is_pinned`. Scores are display-rounded.
    pub fn annotated_metadata(&self) -> Map<String, Value> {
        let mut map = self.candidate.metadata.to_payload();
        map.insert("adjustment".to_string(), Value::from(self.display_adjustment()));
        map.insert("adjusted_score".to_string(), Value::from(self.display_score()));
        map.insert("rerank_score".to_string(), Value::from(self.display_score()));
        map.insert(
            "original_score".to_string(),
            Value::from(self.display_original_score()),
        );
        map.insert("is_pinned".to_string(), Value::Bool(self.is_pinned));
        map
    }

    /// One-line human readable summary.
    pub fn display_line(&self) -> String {
        let meta = &self.candidate.metadata;
        let pages = if meta.pages > 0 {
            meta.pages.to_string()
        } else {
            "N/A".to_string()
        };
        let pin = if self.is_pinned { " [pinned match]" } else { "" };

        format!(
            "{} – {} | shelf: {} | pages: {} | rating: {}★ | adj: {:+.2}{}",
            meta.title, meta.author, meta.shelf_label, pages, meta.rating, self.adjustment, pin
        )
    }
}

impl Serialize for ScoredCandidate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ScoredCandidate", 2)?;
        state.serialize_field("content", &self.candidate.content)?;
        state.serialize_field("metadata", &self.annotated_metadata())?;
        state.end()
    }
}

/// Input to [`PreferenceReranker::rank`](super::PreferenceReranker::rank).
#[derive(Debug, Clone, PartialEq)]
pub struct RankingRequest {
    /// Candidates in retrieval order (ascending distance).
    pub candidates: Vec<Candidate>,
    /// Subtracted from the score of books rated 4 or 5. Must be `>= 0`.
    pub rating_boost: f64,
    /// Added to the score of abandoned books. Must be `>= 0`.
    pub dnf_penalty: f64,
    /// Final context size. Must be `>= 1`.
    pub k: usize,
}

impl RankingRequest {
    /// Creates a request with default weights and `k`.
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            rating_boost: DEFAULT_RATING_BOOST,
            dnf_penalty: DEFAULT_DNF_PENALTY,
            k: DEFAULT_K,
        }
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_rating_boost(mut self, rating_boost: f64) -> Self {
        self.rating_boost = rating_boost;
        self
    }

    pub fn with_dnf_penalty(mut self, dnf_penalty: f64) -> Self {
        self.dnf_penalty = dnf_penalty;
        self
    }

    /// Rejects malformed parameters. An empty candidate list is valid.
    pub fn validate(&self) -> Result<(), super::RankingError> {
        use super::RankingError;

        if self.k < 1 {
            return Err(RankingError::invalid(format!(
                "k must be at least 1, got {}",
                self.k
            )));
        }

        if !self.rating_boost.is_finite() || self.rating_boost < 0.0 {
            return Err(RankingError::invalid(format!(
                "rating_boost must be a non-negative number, got {}",
                self.rating_boost
            )));
        }

        if !self.dnf_penalty.is_finite() || self.dnf_penalty < 0.0 {
            return Err(RankingError::invalid(format!(
                "dnf_penalty must be a non-negative number, got {}",
                self.dnf_penalty
            )));
        }

        Ok(())
    }
}

/// Final context set, in presentation order.
///
/// With a pin present the order is pinned-first, then ascending adjusted
/// score; it is not globally sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankingResult {
    entries: Vec<ScoredCandidate>,
}

impl RankingResult {
    pub(crate) fn new(entries: Vec<ScoredCandidate>) -> Self {
        Self { entries }
    }

    /// An empty result means "nothing relevant", not a failure.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[ScoredCandidate] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ScoredCandidate> {
        self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredCandidate> {
        self.entries.iter()
    }

    /// The pinned entry, which is always first when present.
    pub fn pinned(&self) -> Option<&ScoredCandidate> {
        self.entries.first().filter(|entry| entry.is_pinned)
    }

    /// Entry contents joined for the generation prompt.
    pub fn context_string(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.candidate.content.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR)
    }
}

impl<'a> IntoIterator for &'a RankingResult {
    type Item = &'a ScoredCandidate;
    type IntoIter = std::slice::Iter<'a, ScoredCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for RankingResult {
    type Item = ScoredCandidate;
    type IntoIter = std::vec::IntoIter<ScoredCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
