use thiserror::Error;

use crate::vectordb::VectorDbError;

#[derive(Debug, Error)]
/// Errors returned by [`CandidateFetcher::fetch`](super::CandidateFetcher::fetch).
pub enum FetchError {
    /// The index is missing or unreachable. Retrying will not help until the
    /// reading history has been indexed (or the store is back up).
    #[error("vector store unavailable: {source}")]
    StoreUnavailable {
        #[source]
        source: VectorDbError,
    },

    /// The query was blank.
    #[error("query text is empty")]
    EmptyQuery,

    /// Any other index failure (embedding, search transport).
    #[error("candidate search failed: {0}")]
    Search(VectorDbError),
}

impl From<VectorDbError> for FetchError {
    fn from(err: VectorDbError) -> Self {
        if err.is_unavailable() {
            FetchError::StoreUnavailable { source: err }
        } else {
            FetchError::Search(err)
        }
    }
}

impl FetchError {
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, FetchError::StoreUnavailable { .. })
    }
}
