use thiserror::Error;

use crate::fetcher::FetchError;
use crate::generation::GenerationError;
use crate::ranking::RankingError;

/// Message shown when the reading history has not been indexed.
pub const STORE_UNAVAILABLE_MESSAGE: &str = "No reading-history index is available. \
Run your ingestion pipeline to load the reading history into the configured Qdrant \
collection (SHELFRANK_COLLECTION), make sure Qdrant is reachable at SHELFRANK_QDRANT_URL, \
then try again.";

#[derive(Debug, Error)]
/// Errors returned by the [`Recommender`](super::Recommender).
pub enum RecommendError {
    #[error(transparent)]
    Ranking(#[from] RankingError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("explanation failed: {0}")]
    Generation(#[from] GenerationError),
}

impl RecommendError {
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, RecommendError::Fetch(e) if e.is_store_unavailable())
    }

    /// Text suitable for showing to the end user.
    pub fn user_message(&self) -> String {
        if self.is_store_unavailable() {
            STORE_UNAVAILABLE_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}
