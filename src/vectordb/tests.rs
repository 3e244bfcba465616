use super::*;
use crate::metadata::{BookMetadata, ShelfStatus};
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{ListValue, Struct, Value as QdrantValue};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Arc;

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("fixture must be an object"),
    }
}

fn qv(kind: Kind) -> QdrantValue {
    QdrantValue { kind: Some(kind) }
}

fn seeded_index() -> MockVectorIndex {
    let index = MockVectorIndex::new();
    index.insert(
        "dragons hoard gold under the mountain",
        BookMetadata::new("The Hobbit", "Tolkien")
            .with_rating(5)
            .with_shelf("read"),
    );
    index.insert(
        "a desert planet and giant sand worms",
        BookMetadata::new("Dune", "Herbert").with_shelf("dnf"),
    );
    index.insert(
        "a detective solves a murder in london",
        BookMetadata::new("Study in Scarlet", "Doyle")
            .with_rating(3)
            .with_shelf("read"),
    );
    index
}

#[test]
fn test_similarity_to_distance() {
    assert_eq!(similarity_to_distance(1.0), 0.0);
    assert_eq!(similarity_to_distance(0.0), 1.0);
    assert!((similarity_to_distance(0.75) - 0.25).abs() < 1e-6);
}

#[test]
fn test_candidate_from_nested_payload() {
    let payload = object(json!({
        "page_content": "Title: Dune",
        "metadata": { "title": "Dune", "author": "Herbert", "rating": 2, "shelf": "DNF" }
    }));

    let candidate = candidate_from_payload(payload, 0.3);

    assert_eq!(candidate.content, "Title: Dune");
    assert_eq!(candidate.metadata.title, "Dune");
    assert_eq!(candidate.metadata.shelf, ShelfStatus::Abandoned);
    assert_eq!(candidate.raw_score, 0.3);
}

#[test]
fn test_candidate_from_flat_payload() {
    let payload = object(json!({
        "content": "Title: Emma",
        "title": "Emma",
        "rating": 4,
        "shelf": "read",
        "blurb": "matchmaking"
    }));

    let candidate = candidate_from_payload(payload, 0.1);

    assert_eq!(candidate.content, "Title: Emma");
    assert_eq!(candidate.metadata.rating, 4);
    assert_eq!(candidate.metadata.extra.get("blurb"), Some(&json!("matchmaking")));
    assert!(!candidate.metadata.extra.contains_key("content"));
}

#[test]
fn test_candidate_without_content_or_metadata_uses_defaults() {
    let candidate = candidate_from_payload(Map::new(), 0.5);

    assert_eq!(candidate.content, "");
    assert_eq!(candidate.metadata, BookMetadata::default());
}

#[test]
fn test_candidate_with_non_object_metadata_reads_flat_fields() {
    let payload = object(json!({ "page_content": "x", "metadata": "oops", "title": "Emma" }));

    let candidate = candidate_from_payload(payload, 0.5);

    assert_eq!(candidate.content, "x");
    assert_eq!(candidate.metadata.title, "Emma");
}

#[test]
fn test_candidate_with_non_string_content_keeps_metadata() {
    let payload = object(json!({ "page_content": 12, "metadata": { "title": "Dune", "shelf": "dnf" } }));

    let candidate = candidate_from_payload(payload, 0.5);

    assert_eq!(candidate.content, "");
    assert_eq!(candidate.metadata.title, "Dune");
    assert!(candidate.metadata.shelf.is_abandoned());
}

#[test]
fn test_malformed_hits_keep_retrieval_positions() {
    // Rank 6 is an abandoned book; the malformed hits ahead of it must not
    // shift it into the pin window.
    let payloads = [
        json!({ "page_content": "a", "metadata": { "title": "A", "rating": 4.5 } }),
        json!({ "page_content": "b", "metadata": { "title": "B", "rating": "4" } }),
        json!({ "page_content": "c", "metadata": { "title": "C", "rating": 6 } }),
        json!({ "page_content": "d", "metadata": { "title": "D", "shelf": ["read"] } }),
        json!({ "page_content": "e", "metadata": { "title": "E", "rating": 3 } }),
        json!({ "page_content": "f", "metadata": { "title": "F", "shelf": "dnf" } }),
    ];
    let candidates: Vec<_> = payloads
        .into_iter()
        .enumerate()
        .map(|(i, payload)| candidate_from_payload(object(payload), 0.1 * (i + 1) as f64))
        .collect();

    assert_eq!(candidates.len(), 6);
    assert_eq!(candidates[0].metadata.rating, 0);
    assert_eq!(candidates[1].metadata.rating, 4);
    assert_eq!(candidates[2].metadata.rating, 0);
    assert_eq!(candidates[3].metadata.shelf, ShelfStatus::Unknown);
    assert_eq!(crate::ranking::find_pin(&candidates, crate::constants::PIN_WINDOW), None);

    let result = crate::ranking::rank(crate::ranking::RankingRequest::new(candidates).with_k(6))
        .expect("valid request");
    assert!(result.pinned().is_none());
    assert_eq!(result.len(), 6);
}

#[test]
fn test_qdrant_value_to_json_scalars() {
    assert_eq!(qdrant_value_to_json(QdrantValue { kind: None }), Value::Null);
    assert_eq!(qdrant_value_to_json(qv(Kind::BoolValue(true))), json!(true));
    assert_eq!(qdrant_value_to_json(qv(Kind::IntegerValue(4))), json!(4));
    assert_eq!(qdrant_value_to_json(qv(Kind::DoubleValue(0.5))), json!(0.5));
    assert_eq!(
        qdrant_value_to_json(qv(Kind::StringValue("dnf".to_string()))),
        json!("dnf")
    );
    assert_eq!(
        qdrant_value_to_json(qv(Kind::DoubleValue(f64::NAN))),
        Value::Null
    );
}

#[test]
fn test_qdrant_value_to_json_nested() {
    let mut fields = HashMap::new();
    fields.insert("rating".to_string(), qv(Kind::IntegerValue(5)));
    fields.insert(
        "tags".to_string(),
        qv(Kind::ListValue(ListValue {
            values: vec![qv(Kind::StringValue("fantasy".to_string()))],
        })),
    );

    let json = qdrant_value_to_json(qv(Kind::StructValue(Struct { fields })));

    assert_eq!(json, json!({ "rating": 5, "tags": ["fantasy"] }));
}

#[test]
fn test_cosine_similarity_basics() {
    assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
    assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
}

#[tokio::test]
async fn test_mock_index_orders_by_distance() {
    let index = seeded_index();

    let results = index
        .similarity_search_with_score("gold hoarding dragons", 3)
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].metadata.title, "The Hobbit");
    assert!(
        results
            .windows(2)
            .all(|pair| pair[0].raw_score <= pair[1].raw_score),
        "distances must ascend"
    );
}

#[tokio::test]
async fn test_mock_index_truncates_to_n() {
    let index = seeded_index();

    let results = index.similarity_search_with_score("planet", 2).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(index.len(), 3);
    assert!(!index.is_empty());
}

#[tokio::test]
async fn test_static_index_keeps_order() {
    let candidates = vec![
        crate::ranking::Candidate::new("a", BookMetadata::default(), 0.1),
        crate::ranking::Candidate::new("b", BookMetadata::default(), 0.2),
    ];
    let index = StaticVectorIndex::new(candidates);

    let results = index.similarity_search_with_score("ignored", 1).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].content, "a");
}

#[tokio::test]
async fn test_arc_index_delegates() {
    let index = Arc::new(seeded_index());

    let results = index.similarity_search_with_score("sand worms", 1).await.unwrap();

    assert_eq!(results[0].metadata.title, "Dune");
}

#[tokio::test]
async fn test_handle_builds_once() {
    let handle = IndexHandle::new(MockIndexBuilder::new(Arc::new(seeded_index())));
    assert!(!handle.is_initialized());

    let first = handle.get().await.unwrap();
    let second = handle.get().await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(handle.builder().build_count(), 1);
    assert!(handle.is_initialized());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_handle_concurrent_first_use_builds_once() {
    let handle = Arc::new(IndexHandle::new(MockIndexBuilder::new(Arc::new(
        seeded_index(),
    ))));

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let handle = Arc::clone(&handle);
            tokio::spawn(async move { handle.get().await.map(|_| ()) })
        })
        .collect();

    for task in tasks {
        task.await.expect("task panicked").expect("build succeeds");
    }

    assert_eq!(handle.builder().build_count(), 1);
}

#[tokio::test]
async fn test_handle_failed_build_is_not_cached() {
    let handle = IndexHandle::new(MockIndexBuilder::failing(Arc::new(seeded_index()), 1));

    let err = handle.get().await.unwrap_err();
    assert!(err.is_unavailable());
    assert!(!handle.is_initialized());

    handle.get().await.expect("second build succeeds");
    assert_eq!(handle.builder().build_count(), 2);
}

#[test]
fn test_error_unavailability_classification() {
    assert!(
        VectorDbError::CollectionNotFound {
            collection: "c".to_string()
        }
        .is_unavailable()
    );
    assert!(
        VectorDbError::ConnectionFailed {
            url: "u".to_string(),
            message: "m".to_string()
        }
        .is_unavailable()
    );
    assert!(
        !VectorDbError::SearchFailed {
            collection: "c".to_string(),
            message: "m".to_string()
        }
        .is_unavailable()
    );
}

#[test]
fn test_qdrant_client_new_does_not_connect() {
    let client = QdrantClient::new(DEFAULT_QDRANT_URL).expect("builder is lazy");
    assert_eq!(client.url(), DEFAULT_QDRANT_URL);
}

#[test]
fn test_index_builder_carries_embedding_dimension() {
    let config = crate::config::Config {
        embed_dim: 1024,
        collection: "books".to_string(),
        ..Default::default()
    };

    let builder = QdrantIndexBuilder::from_config(&config);

    assert_eq!(builder.embed_dim, 1024);
    assert_eq!(builder.collection, "books");
    assert_eq!(
        crate::config::Config::default().embed_dim,
        crate::constants::DEFAULT_EMBEDDING_DIM
    );
}

#[tokio::test]
async fn test_mock_index_books_by_author() {
    let index = seeded_index();

    let books = index.books_by_author(" Herbert ").await.unwrap();
    let none = index.books_by_author("herbert").await.unwrap();

    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Dune");
    assert!(none.is_empty(), "author match is exact");
}
