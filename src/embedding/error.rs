use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by embedding backends.
pub enum EmbeddingError {
    /// The embedding service could not be reached.
    #[error("embedding request to '{url}' failed: {message}")]
    RequestFailed {
        /// Endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// The service answered with a non-success status.
    #[error("embedding service returned {status}: {message}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The response body could not be interpreted.
    #[error("invalid embedding response: {reason}")]
    InvalidResponse {
        /// What was wrong with the response.
        reason: String,
    },

    /// Embedding length does not match the configured dimension.
    #[error("invalid embedding dimension: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    #[error("invalid embedder configuration: {reason}")]
    InvalidConfig { reason: String },
}
