//! End-to-end recommendation: fetch, rerank, explain.

pub mod error;


pub use error::{RecommendError, STORE_UNAVAILABLE_MESSAGE};

use tracing::{debug, info};

use crate::config::Config;
use crate::constants::{DEFAULT_DNF_PENALTY, DEFAULT_K, DEFAULT_RATING_BOOST};
use crate::fetcher::CandidateFetcher;
use crate::generation::{Generator, build_prompt};
use crate::ranking::{Candidate, PreferenceReranker, RankingRequest, RankingResult};
use crate::vectordb::IndexBuilder;

/// Neutral message for a query with no similar books in the history.
pub const NO_MATCHES_MESSAGE: &str =
    "No similar books were found in your reading history, so there is nothing to compare against.";

/// Per-call ranking parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendParams {
    pub k: usize,
    pub rating_boost: f64,
    pub dnf_penalty: f64,
}

impl Default for RecommendParams {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            rating_boost: DEFAULT_RATING_BOOST,
            dnf_penalty: DEFAULT_DNF_PENALTY,
        }
    }
}

impl RecommendParams {
    pub fn from_config(config: &Config) -> Self {
        Self {
            k: config.k,
            rating_boost: config.rating_boost,
            dnf_penalty: config.dnf_penalty,
        }
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    fn request(&self, candidates: Vec<Candidate>) -> RankingRequest {
        RankingRequest::new(candidates)
            .with_k(self.k)
            .with_rating_boost(self.rating_boost)
            .with_dnf_penalty(self.dnf_penalty)
    }
}

/// Outcome of [`Recommender::recommend`].
#[derive(Debug)]
pub enum Recommendation {
    /// Nothing similar was retrieved; no explanation was generated.
    NoMatches,
    Explained {
        explanation: String,
        contexts: RankingResult,
    },
}

impl Recommendation {
    /// The explanation, or [`NO_MATCHES_MESSAGE`].
    pub fn message(&self) -> &str {
        match self {
            Recommendation::NoMatches => NO_MATCHES_MESSAGE,
            Recommendation::Explained { explanation, .. } => explanation,
        }
    }

    pub fn contexts(&self) -> Option<&RankingResult> {
        match self {
            Recommendation::NoMatches => None,
            Recommendation::Explained { contexts, .. } => Some(contexts),
        }
    }
}

/// Wires the fetcher, the preference reranker and a generator together.
pub struct Recommender<B: IndexBuilder, G> {
    fetcher: CandidateFetcher<B>,
    reranker: PreferenceReranker,
    generator: G,
}

impl<B: IndexBuilder, G: Generator> Recommender<B, G> {
    pub fn new(fetcher: CandidateFetcher<B>, generator: G) -> Self {
        Self {
            fetcher,
            reranker: PreferenceReranker::new(),
            generator,
        }
    }

    pub fn with_reranker(mut self, reranker: PreferenceReranker) -> Self {
        self.reranker = reranker;
        self
    }

    pub fn fetcher(&self) -> &CandidateFetcher<B> {
        &self.fetcher
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Fetches and reranks the context for `query`.
    ///
    /// Parameters are validated before the index is touched.
    pub async fn select_context(
        &self,
        query: &str,
        params: &RecommendParams,
    ) -> Result<RankingResult, RecommendError> {
        params.request(Vec::new()).validate()?;

        let candidates = self.fetcher.fetch(query).await?;
        let result = self.reranker.rank(params.request(candidates))?;

        debug!(
            selected = result.len(),
            pinned = result.pinned().is_some(),
            "Context selected"
        );

        Ok(result)
    }

    /// Selects context and asks the generator for a verdict.
    pub async fn recommend(
        &self,
        query: &str,
        params: &RecommendParams,
    ) -> Result<Recommendation, RecommendError> {
        let contexts = self.select_context(query, params).await?;

        if contexts.is_empty() {
            info!("No similar books in the reading history");
            return Ok(Recommendation::NoMatches);
        }

        let prompt = build_prompt(query, &contexts);
        let explanation = self.generator.generate(&prompt).await?;

        Ok(Recommendation::Explained {
            explanation,
            contexts,
        })
    }
}
