//! Cross-cutting, shared constants.
//!
//! Ranking weights here are only defaults; callers pass their own through
//! [`RankingRequest`](crate::ranking::RankingRequest).

/// Number of leading retrieval results examined by the pin scan.
pub const PIN_WINDOW: usize = 5;

/// Candidate pool size requested from the vector index before reranking.
pub const DEFAULT_FETCH_SIZE: u64 = 20;

/// Final context size handed to the generation step.
pub const DEFAULT_K: usize = 5;

pub const DEFAULT_RATING_BOOST: f64 = 0.3;

pub const DEFAULT_DNF_PENALTY: f64 = 0.4;

/// Ratings at or above this value receive the rating boost.
pub const HIGH_RATING_THRESHOLD: u8 = 4;

pub const MAX_RATING: u8 = 5;

/// Decimal places used when displaying raw and adjusted scores.
pub const SCORE_DISPLAY_PRECISION: i32 = 4;

/// Decimal places used when displaying the signed adjustment.
pub const ADJUSTMENT_DISPLAY_PRECISION: i32 = 2;

/// Separator placed between context documents in the generation prompt.
pub const CONTEXT_SEPARATOR: &str = "\n---\n";

/// Dimension of `nomic-embed-text`, the default embedding model.
pub const DEFAULT_EMBEDDING_DIM: usize = 768;

/// Rounds `value` to `places` decimal places for display.
///
/// Comparisons must always use the unrounded value.
#[inline]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
