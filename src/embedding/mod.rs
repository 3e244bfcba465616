//! Query embedding.
//!
//! - [`OllamaEmbedder`] calls a local Ollama server (`/api/embed`).
//! - `MockEmbedder` (feature `mock`) hashes words into a fixed-size vector,
//!   so texts sharing vocabulary land close together.

mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod ollama;


pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;
pub use ollama::{DEFAULT_EMBED_MODEL, DEFAULT_OLLAMA_URL, OllamaEmbedder};

/// Turns text into a dense vector.
pub trait Embedder: Send + Sync {
    /// Embeds a single text.
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<f32>, EmbeddingError>> + Send;

    /// Output dimension, when known up front.
    fn dimension(&self) -> Option<usize>;
}
