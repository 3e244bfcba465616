use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by generation backends.
pub enum GenerationError {
    /// The chat provider call failed.
    #[error("chat model '{model}' request failed: {message}")]
    ProviderFailed {
        /// Model name.
        model: String,
        /// Error message.
        message: String,
    },

    /// The provider answered without any text.
    #[error("chat model '{model}' returned no text")]
    EmptyResponse {
        /// Model name.
        model: String,
    },

    /// The call did not finish in time.
    #[error("chat model '{model}' timed out after {seconds}s")]
    Timeout {
        /// Model name.
        model: String,
        /// Configured timeout.
        seconds: u64,
    },
}
