use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
/// Errors returned by vector index operations.
pub enum VectorDbError {
    /// Could not connect to the Qdrant endpoint.
    #[error("failed to connect to Qdrant at '{url}': {message}")]
    ConnectionFailed {
        /// Endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// Collection does not exist (the reading history was never indexed).
    #[error("collection not found: {collection}")]
    CollectionNotFound {
        /// Collection name.
        collection: String,
    },

    /// Search failed.
    #[error("failed to search in '{collection}': {message}")]
    SearchFailed {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// Query embedding failed.
    #[error("query embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Vector dimension mismatch.
    #[error("invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },
}

impl VectorDbError {
    /// `true` when the index itself is missing or unreachable, as opposed to
    /// a failure of one particular query.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            VectorDbError::ConnectionFailed { .. } | VectorDbError::CollectionNotFound { .. }
        )
    }
}
