use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    Condition, Filter, RetrievedPoint, ScoredPoint, ScrollPointsBuilder, SearchPointsBuilder,
};
use tracing::debug;

use super::error::VectorDbError;
use super::model::{candidate_from_payload, candidate_from_scored_point, payload_to_json};
use crate::embedding::Embedder;
use crate::metadata::BookMetadata;
use crate::ranking::Candidate;

/// Page size used when scrolling a collection.
const SCROLL_PAGE_SIZE: u32 = 256;

/// Payload fields that may carry the author, for flat and nested layouts.
const AUTHOR_FIELDS: [&str; 2] = ["author", "metadata.author"];

#[derive(Clone)]
/// Direct Qdrant client wrapper.
pub struct QdrantClient {
    client: Qdrant,
    url: String,
}

impl std::fmt::Debug for QdrantClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QdrantClient")
            .field("url", &self.url)
            .finish()
    }
}

impl QdrantClient {
    /// Creates a client for `url`.
    pub fn new(url: &str) -> Result<Self, VectorDbError> {
        let client =
            Qdrant::from_url(url)
                .build()
                .map_err(|e| VectorDbError::ConnectionFailed {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Returns the underlying Qdrant client.
    pub fn client(&self) -> &Qdrant {
        &self.client
    }

    /// Returns the configured URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Performs a basic health check request.
    pub async fn health_check(&self) -> Result<(), VectorDbError> {
        self.client
            .health_check()
            .await
            .map_err(|e| VectorDbError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Returns `true` if the collection exists.
    pub async fn collection_exists(&self, name: &str) -> Result<bool, VectorDbError> {
        self.client
            .collection_exists(name)
            .await
            .map_err(|e| VectorDbError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })
    }

    /// Searches a collection by vector similarity, payload included.
    pub async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<ScoredPoint>, VectorDbError> {
        let search_builder = SearchPointsBuilder::new(collection, query, limit).with_payload(true);

        let search_result = self
            .client
            .search_points(search_builder)
            .await
            .map_err(|e| VectorDbError::SearchFailed {
                collection: collection.to_string(),
                message: e.to_string(),
            })?;

        Ok(search_result.result)
    }

    /// Returns every point matching `filter`, following scroll pages.
    pub async fn scroll_all(
        &self,
        collection: &str,
        filter: Filter,
    ) -> Result<Vec<RetrievedPoint>, VectorDbError> {
        let mut points = Vec::new();
        let mut offset = None;

        loop {
            let mut builder = ScrollPointsBuilder::new(collection)
                .filter(filter.clone())
                .limit(SCROLL_PAGE_SIZE)
                .with_payload(true);
            if let Some(offset) = offset.take() {
                builder = builder.offset(offset);
            }

            let page = self
                .client
                .scroll(builder)
                .await
                .map_err(|e| VectorDbError::SearchFailed {
                    collection: collection.to_string(),
                    message: e.to_string(),
                })?;

            points.extend(page.result);

            match page.next_page_offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(points)
    }
}

/// Similarity search over the indexed reading history.
pub trait VectorIndex: Send + Sync {
    /// Returns up to `n` candidates for `query`, ascending by distance.
    fn similarity_search_with_score(
        &self,
        query: &str,
        n: u64,
    ) -> impl std::future::Future<Output = Result<Vec<Candidate>, VectorDbError>> + Send;

    /// Returns the metadata of every indexed book whose author is exactly
    /// `author`, in index order.
    fn books_by_author(
        &self,
        author: &str,
    ) -> impl std::future::Future<Output = Result<Vec<BookMetadata>, VectorDbError>> + Send;
}

/// [`VectorIndex`] backed by a Qdrant collection and a query embedder.
#[derive(Debug, Clone)]
pub struct QdrantIndex<E> {
    client: QdrantClient,
    collection: String,
    embedder: E,
}

impl<E: Embedder> QdrantIndex<E> {
    /// Connects and checks that `collection` exists.
    pub async fn connect(
        client: QdrantClient,
        collection: impl Into<String>,
        embedder: E,
    ) -> Result<Self, VectorDbError> {
        let collection = collection.into();

        if !client.collection_exists(&collection).await? {
            return Err(VectorDbError::CollectionNotFound { collection });
        }

        Ok(Self {
            client,
            collection,
            embedder,
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }
}

impl<E: Embedder> VectorIndex for QdrantIndex<E> {
    async fn similarity_search_with_score(
        &self,
        query: &str,
        n: u64,
    ) -> Result<Vec<Candidate>, VectorDbError> {
        let vector = self.embedder.embed(query).await?;

        if let Some(expected) = self.embedder.dimension()
            && vector.len() != expected
        {
            return Err(VectorDbError::InvalidDimension {
                expected,
                actual: vector.len(),
            });
        }

        let points = self.client.search(&self.collection, vector, n).await?;

        let mut candidates: Vec<Candidate> =
            points.into_iter().map(candidate_from_scored_point).collect();

        // Qdrant returns descending similarity; distances must ascend.
        candidates.sort_by(|a, b| {
            a.raw_score
                .partial_cmp(&b.raw_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(
            collection = %self.collection,
            hits = candidates.len(),
            "Similarity search complete"
        );

        Ok(candidates)
    }

    async fn books_by_author(&self, author: &str) -> Result<Vec<BookMetadata>, VectorDbError> {
        let author = author.trim();
        let filter = Filter::should(
            AUTHOR_FIELDS.map(|field| Condition::matches(field, author.to_string())),
        );

        let points = self.client.scroll_all(&self.collection, filter).await?;

        debug!(
            collection = %self.collection,
            author,
            points = points.len(),
            "Author scroll complete"
        );

        Ok(points
            .into_iter()
            .map(|point| candidate_from_payload(payload_to_json(point.payload), 0.0).metadata)
            .collect())
    }
}

impl<I: VectorIndex> VectorIndex for std::sync::Arc<I> {
    fn similarity_search_with_score(
        &self,
        query: &str,
        n: u64,
    ) -> impl std::future::Future<Output = Result<Vec<Candidate>, VectorDbError>> + Send {
        (**self).similarity_search_with_score(query, n)
    }

    fn books_by_author(
        &self,
        author: &str,
    ) -> impl std::future::Future<Output = Result<Vec<BookMetadata>, VectorDbError>> + Send {
        (**self).books_by_author(author)
    }
}
