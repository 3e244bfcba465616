//! Candidate fetching: a thin pass-through to the vector index.
//!
//! The fetcher over-fetches (default [`DEFAULT_FETCH_SIZE`]) so the reranker
//! and the pin rule have material to rearrange. Store failures are returned
//! as-is, never retried.

pub mod error;


pub use error::FetchError;

use std::sync::Arc;

use tracing::debug;

pub use crate::constants::DEFAULT_FETCH_SIZE;
use crate::ranking::Candidate;
use crate::vectordb::{IndexBuilder, IndexHandle, VectorIndex};

/// Fetches the raw candidate pool for a query.
pub struct CandidateFetcher<B: IndexBuilder> {
    handle: Arc<IndexHandle<B>>,
    fetch_size: u64,
}

impl<B: IndexBuilder> Clone for CandidateFetcher<B> {
    fn clone(&self) -> Self {
        Self {
            handle: Arc::clone(&self.handle),
            fetch_size: self.fetch_size,
        }
    }
}

impl<B: IndexBuilder> CandidateFetcher<B> {
    pub fn new(handle: Arc<IndexHandle<B>>) -> Self {
        Self {
            handle,
            fetch_size: DEFAULT_FETCH_SIZE,
        }
    }

    /// Overrides the pool size (at least 1).
    pub fn with_fetch_size(mut self, fetch_size: u64) -> Self {
        self.fetch_size = fetch_size.max(1);
        self
    }

    pub fn fetch_size(&self) -> u64 {
        self.fetch_size
    }

    pub fn handle(&self) -> &Arc<IndexHandle<B>> {
        &self.handle
    }

    /// Returns up to `fetch_size` candidates in ascending distance order.
    pub async fn fetch(&self, query: &str) -> Result<Vec<Candidate>, FetchError> {
        if query.trim().is_empty() {
            return Err(FetchError::EmptyQuery);
        }

        let index = self.handle.get().await?;
        let candidates = index
            .similarity_search_with_score(query, self.fetch_size)
            .await?;

        debug!(
            requested = self.fetch_size,
            returned = candidates.len(),
            "Fetched candidate pool"
        );

        Ok(candidates)
    }
}
