use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::embedding::MockEmbedder;
use crate::metadata::BookMetadata;
use crate::ranking::Candidate;
use crate::vectordb::{IndexBuilder, VectorDbError, VectorIndex, similarity_to_distance};

/// In-memory [`VectorIndex`] using [`MockEmbedder`] and cosine distance.
#[derive(Debug, Default)]
pub struct MockVectorIndex {
    embedder: MockEmbedder,
    documents: RwLock<Vec<MockDocument>>,
}

#[derive(Debug)]
struct MockDocument {
    content: String,
    metadata: BookMetadata,
    vector: Vec<f32>,
}

impl MockVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes a document.
    pub fn insert(&self, content: impl Into<String>, metadata: BookMetadata) {
        let content = content.into();
        let vector = self.embedder.embed_sync(&content);

        self.documents.write().push(MockDocument {
            content,
            metadata,
            vector,
        });
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VectorIndex for MockVectorIndex {
    async fn similarity_search_with_score(
        &self,
        query: &str,
        n: u64,
    ) -> Result<Vec<Candidate>, VectorDbError> {
        let query_vector = self.embedder.embed_sync(query);

        let documents = self.documents.read();

        let mut results: Vec<Candidate> = documents
            .iter()
            .map(|doc| {
                let similarity = cosine_similarity(&query_vector, &doc.vector);
                Candidate::new(
                    doc.content.clone(),
                    doc.metadata.clone(),
                    similarity_to_distance(similarity),
                )
            })
            .collect();

        results.sort_by(|a, b| {
            a.raw_score
                .partial_cmp(&b.raw_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        results.truncate(n as usize);
        Ok(results)
    }

    async fn books_by_author(&self, author: &str) -> Result<Vec<BookMetadata>, VectorDbError> {
        let author = author.trim();
        Ok(self
            .documents
            .read()
            .iter()
            .filter(|doc| doc.metadata.author == author)
            .map(|doc| doc.metadata.clone())
            .collect())
    }
}

/// [`VectorIndex`] that returns a fixed candidate list, truncated to `n`.
#[derive(Debug, Clone, Default)]
pub struct StaticVectorIndex {
    candidates: Vec<Candidate>,
}

impl StaticVectorIndex {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }
}

impl VectorIndex for StaticVectorIndex {
    async fn similarity_search_with_score(
        &self,
        _query: &str,
        n: u64,
    ) -> Result<Vec<Candidate>, VectorDbError> {
        Ok(self.candidates.iter().take(n as usize).cloned().collect())
    }

    async fn books_by_author(&self, author: &str) -> Result<Vec<BookMetadata>, VectorDbError> {
        let author = author.trim();
        Ok(self
            .candidates
            .iter()
            .filter(|c| c.metadata.author == author)
            .map(|c| c.metadata.clone())
            .collect())
    }
}

/// [`IndexBuilder`] over a prepared index that counts build attempts.
///
/// `fail_first` builds fail with [`VectorDbError::CollectionNotFound`]
/// before one succeeds.
pub struct MockIndexBuilder<I> {
    index: I,
    builds: AtomicUsize,
    fail_first: usize,
}

impl<I: VectorIndex + Clone> MockIndexBuilder<I> {
    pub fn new(index: I) -> Self {
        Self {
            index,
            builds: AtomicUsize::new(0),
            fail_first: 0,
        }
    }

    /// Builder whose index is never found.
    pub fn missing(index: I) -> Self {
        Self::failing(index, usize::MAX)
    }

    pub fn failing(index: I, fail_first: usize) -> Self {
        Self {
            index,
            builds: AtomicUsize::new(0),
            fail_first,
        }
    }

    /// Number of times `build` has been called.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

impl<I: VectorIndex + Clone> IndexBuilder for MockIndexBuilder<I> {
    type Index = I;

    async fn build(&self) -> Result<I, VectorDbError> {
        let attempt = self.builds.fetch_add(1, Ordering::SeqCst);
        // Yield so concurrent callers overlap with an in-flight build.
        tokio::task::yield_now().await;

        if attempt < self.fail_first {
            return Err(VectorDbError::CollectionNotFound {
                collection: "mock".to_string(),
            });
        }

        Ok(self.index.clone())
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
