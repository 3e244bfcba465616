//! Explanation generation from the selected context.

pub mod chat;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod prompt;


pub use chat::{DEFAULT_CHAT_MODEL, GenaiGenerator};
pub use error::GenerationError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockGenerator;
pub use prompt::build_prompt;

/// Produces free text from a prompt.
pub trait Generator: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, GenerationError>> + Send;
}
