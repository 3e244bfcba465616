use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
/// Errors returned by [`PreferenceReranker::rank`](super::PreferenceReranker::rank).
pub enum RankingError {
    /// Malformed ranking parameters. Retrying without fixing the input will
    /// fail the same way.
    #[error("invalid ranking request: {reason}")]
    InvalidRequest {
        /// What was wrong with the request.
        reason: String,
    },
}

impl RankingError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        RankingError::InvalidRequest {
            reason: reason.into(),
        }
    }
}

