//! Process-scoped, lazily built index handle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::client::{QdrantClient, QdrantIndex, VectorIndex};
use super::error::VectorDbError;
use crate::embedding::OllamaEmbedder;

/// Knows how to build a [`VectorIndex`]. Building may be expensive.
pub trait IndexBuilder: Send + Sync {
    type Index: VectorIndex;

    fn build(
        &self,
    ) -> impl std::future::Future<Output = Result<Self::Index, VectorDbError>> + Send;
}

/// Shared handle that builds its index on first use.
///
/// Concurrent first callers wait on a single build. Once a build succeeds,
/// every caller gets the same `Arc`; a failed build is not cached, so a later
/// call tries again (for example after the index has been created).
pub struct IndexHandle<B: IndexBuilder> {
    builder: B,
    index: OnceCell<Arc<B::Index>>,
}

impl<B: IndexBuilder> IndexHandle<B> {
    pub fn new(builder: B) -> Self {
        Self {
            builder,
            index: OnceCell::new(),
        }
    }

    /// Returns the index, building it if this is the first successful call.
    pub async fn get(&self) -> Result<Arc<B::Index>, VectorDbError> {
        let index = self
            .index
            .get_or_try_init(|| async {
                info!("Building vector index handle");
                match self.builder.build().await {
                    Ok(index) => {
                        info!("Vector index ready");
                        Ok(Arc::new(index))
                    }
                    Err(e) => {
                        warn!(error = %e, "Vector index unavailable");
                        Err(e)
                    }
                }
            })
            .await?;

        Ok(Arc::clone(index))
    }

    /// `true` once the index has been built.
    pub fn is_initialized(&self) -> bool {
        self.index.initialized()
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }
}

/// Builds a [`QdrantIndex`] that embeds queries with Ollama.
#[derive(Debug, Clone)]
pub struct QdrantIndexBuilder {
    pub qdrant_url: String,
    pub collection: String,
    pub ollama_url: String,
    pub embed_model: String,
    pub embed_dim: usize,
    pub timeout: Duration,
}

impl QdrantIndexBuilder {
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self {
            qdrant_url: config.qdrant_url.clone(),
            collection: config.collection.clone(),
            ollama_url: config.ollama_url.clone(),
            embed_model: config.embed_model.clone(),
            embed_dim: config.embed_dim,
            timeout: config.request_timeout(),
        }
    }
}

impl IndexBuilder for QdrantIndexBuilder {
    type Index = QdrantIndex<OllamaEmbedder>;

    async fn build(&self) -> Result<Self::Index, VectorDbError> {
        let embedder = OllamaEmbedder::new(&self.ollama_url, &self.embed_model, self.timeout)?
            .with_dimension(self.embed_dim);
        let client = QdrantClient::new(&self.qdrant_url)?;
        QdrantIndex::connect(client, &self.collection, embedder).await
    }
}
