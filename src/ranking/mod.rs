//! Preference-aware reranking and context selection.
//!
//! Candidates arrive in retrieval order with a raw distance score (lower is
//! better). [`PreferenceReranker::rank`] applies the reader's preferences:
//!
//! - An abandoned ("DNF") book among the first [`PIN_WINDOW`](crate::constants::PIN_WINDOW)
//!   results is pinned to the front of the result, whatever its score.
//! - Books rated 4 or 5 have `rating_boost` subtracted from their score.
//! - Other abandoned books have `dnf_penalty` added.
//!
//! The rest is a stable ascending sort and a cut to `k` entries.

pub mod error;
pub mod reranker;
pub mod types;


pub use error::RankingError;
pub use reranker::{PreferenceReranker, find_pin, preference_adjustment, rank};
pub use types::{Candidate, RankingRequest, RankingResult, ScoredCandidate};
