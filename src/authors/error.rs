use thiserror::Error;

use crate::vectordb::VectorDbError;

#[derive(Debug, Error)]
/// Errors returned by [`AuthorAnalyzer::profile`](super::AuthorAnalyzer::profile).
pub enum AuthorError {
    /// The author name was blank.
    #[error("author name is empty")]
    EmptyName,

    /// No indexed book is attributed to this author.
    #[error("author '{author}' was not found in the reading history")]
    NotFound {
        /// Author name as queried.
        author: String,
    },

    /// The index is missing or unreachable.
    #[error("vector store unavailable: {source}")]
    StoreUnavailable {
        #[source]
        source: VectorDbError,
    },

    /// Any other index failure.
    #[error("author lookup failed: {0}")]
    Lookup(VectorDbError),
}

impl From<VectorDbError> for AuthorError {
    fn from(err: VectorDbError) -> Self {
        if err.is_unavailable() {
            AuthorError::StoreUnavailable { source: err }
        } else {
            AuthorError::Lookup(err)
        }
    }
}

impl AuthorError {
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, AuthorError::StoreUnavailable { .. })
    }
}
