use parking_lot::Mutex;

use super::{GenerationError, Generator};

/// Canned [`Generator`] that records every prompt it receives.
#[derive(Debug, Default)]
pub struct MockGenerator {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    /// Always answers `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always fails with [`GenerationError::ProviderFailed`].
    pub fn failing() -> Self {
        Self::default()
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().len()
    }
}

impl Generator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().push(prompt.to_string());

        self.reply
            .clone()
            .ok_or_else(|| GenerationError::ProviderFailed {
                model: "mock".to_string(),
                message: "mock provider configured to fail".to_string(),
            })
    }
}
