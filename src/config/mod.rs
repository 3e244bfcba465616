//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SHELFRANK_*` environment
//! variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::time::Duration;

use crate::constants::{
    DEFAULT_DNF_PENALTY, DEFAULT_EMBEDDING_DIM, DEFAULT_FETCH_SIZE, DEFAULT_K,
    DEFAULT_RATING_BOOST,
};
use crate::embedding::{DEFAULT_EMBED_MODEL, DEFAULT_OLLAMA_URL};
use crate::generation::DEFAULT_CHAT_MODEL;
use crate::vectordb::{DEFAULT_COLLECTION_NAME, DEFAULT_QDRANT_URL};

/// Default timeout for embedding and chat requests, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Collection holding the indexed reading history. Default: `reading_history`.
    pub collection: String,

    /// Ollama endpoint used for query embeddings. Default: `http://localhost:11434`.
    pub ollama_url: String,

    /// Embedding model name. Default: `nomic-embed-text`.
    pub embed_model: String,

    /// Expected embedding length; query vectors of any other length are
    /// rejected. Default: `768` (`nomic-embed-text`).
    pub embed_dim: usize,

    /// Chat model used for explanations. Default: `llama3.1`.
    pub chat_model: String,

    /// Number of context entries to select. Default: `5`.
    pub k: usize,

    /// Raw candidates fetched before reranking. Default: `20`.
    pub fetch_size: u64,

    /// Score bonus for highly rated books. Default: `0.3`.
    pub rating_boost: f64,

    /// Score penalty for abandoned books. Default: `0.4`.
    pub dnf_penalty: f64,

    /// Per-request timeout in seconds. Default: `60`.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection: DEFAULT_COLLECTION_NAME.to_string(),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            embed_model: DEFAULT_EMBED_MODEL.to_string(),
            embed_dim: DEFAULT_EMBEDDING_DIM,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            k: DEFAULT_K,
            fetch_size: DEFAULT_FETCH_SIZE,
            rating_boost: DEFAULT_RATING_BOOST,
            dnf_penalty: DEFAULT_DNF_PENALTY,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    const ENV_QDRANT_URL: &'static str = "SHELFRANK_QDRANT_URL";
    const ENV_COLLECTION: &'static str = "SHELFRANK_COLLECTION";
    const ENV_OLLAMA_URL: &'static str = "SHELFRANK_OLLAMA_URL";
    const ENV_EMBED_MODEL: &'static str = "SHELFRANK_EMBED_MODEL";
    const ENV_EMBED_DIM: &'static str = "SHELFRANK_EMBED_DIM";
    const ENV_CHAT_MODEL: &'static str = "SHELFRANK_CHAT_MODEL";
    const ENV_K: &'static str = "SHELFRANK_K";
    const ENV_FETCH_SIZE: &'static str = "SHELFRANK_FETCH_SIZE";
    const ENV_RATING_BOOST: &'static str = "SHELFRANK_RATING_BOOST";
    const ENV_DNF_PENALTY: &'static str = "SHELFRANK_DNF_PENALTY";
    const ENV_REQUEST_TIMEOUT: &'static str = "SHELFRANK_REQUEST_TIMEOUT_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    ///
    /// Malformed numbers are errors rather than silently defaulted.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            qdrant_url: Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url),
            collection: Self::parse_string_from_env(Self::ENV_COLLECTION, defaults.collection),
            ollama_url: Self::parse_string_from_env(Self::ENV_OLLAMA_URL, defaults.ollama_url),
            embed_model: Self::parse_string_from_env(Self::ENV_EMBED_MODEL, defaults.embed_model),
            embed_dim: Self::parse_u64_from_env(Self::ENV_EMBED_DIM, defaults.embed_dim as u64)?
                as usize,
            chat_model: Self::parse_string_from_env(Self::ENV_CHAT_MODEL, defaults.chat_model),
            k: Self::parse_u64_from_env(Self::ENV_K, defaults.k as u64)? as usize,
            fetch_size: Self::parse_u64_from_env(Self::ENV_FETCH_SIZE, defaults.fetch_size)?,
            rating_boost: Self::parse_f64_from_env(Self::ENV_RATING_BOOST, defaults.rating_boost)?,
            dnf_penalty: Self::parse_f64_from_env(Self::ENV_DNF_PENALTY, defaults.dnf_penalty)?,
            request_timeout_secs: Self::parse_u64_from_env(
                Self::ENV_REQUEST_TIMEOUT,
                defaults.request_timeout_secs,
            )?,
        })
    }

    /// Checks counts, weights and endpoints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_empty = [
            (Self::ENV_QDRANT_URL, &self.qdrant_url),
            (Self::ENV_COLLECTION, &self.collection),
            (Self::ENV_OLLAMA_URL, &self.ollama_url),
            (Self::ENV_EMBED_MODEL, &self.embed_model),
            (Self::ENV_CHAT_MODEL, &self.chat_model),
        ];
        for (name, value) in non_empty {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyValue { name });
            }
        }

        let counts = [
            (Self::ENV_K, self.k as u64),
            (Self::ENV_EMBED_DIM, self.embed_dim as u64),
            (Self::ENV_FETCH_SIZE, self.fetch_size),
            (Self::ENV_REQUEST_TIMEOUT, self.request_timeout_secs),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(ConfigError::ZeroCount { name, value });
            }
        }

        for (name, value) in [
            (Self::ENV_RATING_BOOST, self.rating_boost),
            (Self::ENV_DNF_PENALTY, self.dnf_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_u64_from_env(name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::IntParseError {
                    name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_f64_from_env(name: &'static str, default: f64) -> Result<f64, ConfigError> {
        match env::var(name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::FloatParseError {
                    name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }
}
