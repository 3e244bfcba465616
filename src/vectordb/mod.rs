//! Vector index access (Qdrant) and the shared index handle.

pub mod client;
pub mod error;
pub mod handle;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;

#[cfg(test)]
mod tests;

pub use client::{QdrantClient, QdrantIndex, VectorIndex};
pub use error::VectorDbError;
pub use handle::{IndexBuilder, IndexHandle, QdrantIndexBuilder};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockIndexBuilder, MockVectorIndex, StaticVectorIndex, cosine_similarity};
pub use model::{
    CONTENT_KEYS, METADATA_KEY, candidate_from_payload, candidate_from_scored_point,
    payload_to_json, qdrant_value_to_json, similarity_to_distance,
};

/// Default collection holding the indexed reading history.
pub const DEFAULT_COLLECTION_NAME: &str = "reading_history";

/// Default Qdrant URL.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";
