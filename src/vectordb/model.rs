use std::collections::HashMap;

use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{ScoredPoint, Value as QdrantValue};
use serde_json::{Map, Number, Value};
use tracing::warn;

use crate::metadata::BookMetadata;
use crate::ranking::Candidate;

/// Payload keys that may hold the document text, in lookup order.
pub const CONTENT_KEYS: [&str; 2] = ["page_content", "content"];

/// Payload key under which metadata may be nested.
pub const METADATA_KEY: &str = "metadata";

/// Converts a cosine similarity (higher is closer) to a distance (lower is closer).
#[inline]
pub fn similarity_to_distance(similarity: f32) -> f64 {
    1.0 - similarity as f64
}

/// Builds a [`Candidate`] from a JSON payload.
///
/// Accepts both the nested layout (`{"page_content": .., "metadata": {..}}`)
/// and a flat one where metadata fields sit next to the content. Unusable
/// parts fall back to defaults with a warning; a hit is never dropped, so
/// the caller's retrieval order stays intact.
pub fn candidate_from_payload(mut payload: Map<String, Value>, raw_score: f64) -> Candidate {
    let mut content = String::new();
    for key in CONTENT_KEYS {
        match payload.remove(key) {
            Some(Value::String(text)) => {
                content = text;
                break;
            }
            Some(Value::Null) | None => {}
            Some(other) => {
                warn!(key, actual = %other, "Document content is not a string, ignoring it");
            }
        }
    }

    let metadata = match payload.remove(METADATA_KEY) {
        Some(Value::Object(nested)) => BookMetadata::from_payload(&nested),
        Some(other) => {
            warn!(actual = %other, "Nested metadata is not an object, reading flat fields");
            BookMetadata::from_payload(&payload)
        }
        None => BookMetadata::from_payload(&payload),
    };

    Candidate::new(content, metadata, raw_score)
}

/// Builds a [`Candidate`] from a Qdrant search hit.
pub fn candidate_from_scored_point(point: ScoredPoint) -> Candidate {
    candidate_from_payload(payload_to_json(point.payload), similarity_to_distance(point.score))
}

/// Converts a Qdrant payload into a JSON map.
pub fn payload_to_json(payload: HashMap<String, QdrantValue>) -> Map<String, Value> {
    payload
        .into_iter()
        .map(|(key, value)| (key, qdrant_value_to_json(value)))
        .collect()
}

/// Converts a Qdrant payload value into `serde_json::Value`.
pub fn qdrant_value_to_json(value: QdrantValue) -> Value {
    match value.kind {
        None | Some(Kind::NullValue(_)) => Value::Null,
        Some(Kind::BoolValue(b)) => Value::Bool(b),
        Some(Kind::IntegerValue(i)) => Value::Number(i.into()),
        Some(Kind::DoubleValue(d)) => Number::from_f64(d).map_or(Value::Null, Value::Number),
        Some(Kind::StringValue(s)) => Value::String(s),
        Some(Kind::ListValue(list)) => {
            Value::Array(list.values.into_iter().map(qdrant_value_to_json).collect())
        }
        Some(Kind::StructValue(s)) => Value::Object(
            s.fields
                .into_iter()
                .map(|(key, value)| (key, qdrant_value_to_json(value)))
                .collect(),
        ),
    }
}
