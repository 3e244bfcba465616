use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Embedder, EmbeddingError};

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default embedding model.
pub const DEFAULT_EMBED_MODEL: &str = "nomic-embed-text";

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Embedder backed by an Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    client: reqwest::Client,
    host: String,
    model: String,
    dimension: Option<usize>,
}

impl OllamaEmbedder {
    /// Creates an embedder for `model` served at `host`.
    pub fn new(
        host: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, EmbeddingError> {
        let host = host.into().trim_end_matches('/').to_string();
        let model = model.into();

        if host.is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "Ollama host cannot be empty".to_string(),
            });
        }
        if model.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding model cannot be empty".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbeddingError::InvalidConfig {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            host,
            model,
            dimension: None,
        })
    }

    /// Rejects embeddings whose length differs from `dimension`.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/api/embed", self.host)
    }
}

impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let url = self.endpoint();

        debug!(
            model = %self.model,
            text_len = text.len(),
            "Requesting query embedding"
        );

        let response = self
            .client
            .post(&url)
            .json(&EmbedRequest {
                model: &self.model,
                input: vec![text],
            })
            .send()
            .await
            .map_err(|e| EmbeddingError::RequestFailed {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: EmbedResponse =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::InvalidResponse {
                    reason: e.to_string(),
                })?;

        let embedding =
            body.embeddings
                .into_iter()
                .next()
                .ok_or_else(|| EmbeddingError::InvalidResponse {
                    reason: "response contained no embeddings".to_string(),
                })?;

        if let Some(expected) = self.dimension
            && embedding.len() != expected
        {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                actual: embedding.len(),
            });
        }

        Ok(embedding)
    }

    fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}
