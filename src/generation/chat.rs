use std::time::Duration;

use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};
use tracing::{debug, error};

use super::{GenerationError, Generator};

/// Default chat model (served by Ollama).
pub const DEFAULT_CHAT_MODEL: &str = "llama3.1";

/// [`Generator`] backed by the `genai` multi-provider client.
///
/// The provider is inferred from the model name; unrecognized names go to a
/// local Ollama server.
#[derive(Clone)]
pub struct GenaiGenerator {
    client: Client,
    model: String,
    timeout: Duration,
}

impl std::fmt::Debug for GenaiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiGenerator")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GenaiGenerator {
    pub fn new(model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::default(),
            model: model.into(),
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Generator for GenaiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        debug!(model = %self.model, prompt_len = prompt.len(), "Requesting explanation");

        let request = ChatRequest::new(vec![ChatMessage::user(prompt.to_string())]);

        let response = tokio::time::timeout(
            self.timeout,
            self.client.exec_chat(&self.model, request, None),
        )
        .await
        .map_err(|_| GenerationError::Timeout {
            model: self.model.clone(),
            seconds: self.timeout.as_secs(),
        })?
        .map_err(|e| {
            error!(model = %self.model, error = %e, "Chat provider error");
            GenerationError::ProviderFailed {
                model: self.model.clone(),
                message: e.to_string(),
            }
        })?;

        response
            .first_text()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or_else(|| GenerationError::EmptyResponse {
                model: self.model.clone(),
            })
    }
}
