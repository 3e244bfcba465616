//! Shelfrank library crate (used by the CLI and integration tests).
//!
//! Predicts whether a reader will like a new book from the most similar books
//! in their own reading history, weighted by how they actually rated and
//! shelved them.
//!
//! # Public API Surface
//!
//! ## Core Pipeline
//! - [`CandidateFetcher`] - Over-fetches raw candidates from the vector index
//! - [`PreferenceReranker`], [`rank`] - Pin, adjust, sort and cut to `k`
//! - [`Recommender`] - Fetch, rank and explain in one call
//! - [`AuthorAnalyzer`] - Per-author profile and verdict from the history
//!
//! ## Collaborators
//! - [`Embedder`], [`OllamaEmbedder`] - Query embeddings
//! - [`VectorIndex`], [`QdrantIndex`], [`IndexHandle`] - Lazily built index
//! - [`Generator`], [`GenaiGenerator`] - Explanation text
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod authors;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod fetcher;
pub mod generation;
pub mod metadata;
pub mod ranking;
pub mod recommend;
pub mod vectordb;

pub use authors::{AuthorAnalyzer, AuthorError, AuthorProfile, AuthorVerdict};
pub use config::{Config, ConfigError};
pub use constants::{DEFAULT_DNF_PENALTY, DEFAULT_FETCH_SIZE, DEFAULT_K, DEFAULT_RATING_BOOST, PIN_WINDOW};
pub use embedding::{Embedder, EmbeddingError, OllamaEmbedder};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use fetcher::{CandidateFetcher, FetchError};
pub use generation::{GenaiGenerator, GenerationError, Generator, build_prompt};
#[cfg(any(test, feature = "mock"))]
pub use generation::MockGenerator;
pub use metadata::{BookMetadata, MetadataError, ShelfStatus};
pub use ranking::{
    Candidate, PreferenceReranker, RankingError, RankingRequest, RankingResult, ScoredCandidate,
    rank,
};
pub use recommend::{
    NO_MATCHES_MESSAGE, Recommendation, RecommendError, RecommendParams, Recommender,
};
pub use vectordb::{
    IndexBuilder, IndexHandle, QdrantClient, QdrantIndex, QdrantIndexBuilder, VectorDbError,
    VectorIndex,
};
#[cfg(any(test, feature = "mock"))]
pub use vectordb::{MockIndexBuilder, MockVectorIndex, StaticVectorIndex};
