//! Integration tests for charades-server item endpoints
//!
//! Tests cover:
//! - Health endpoint with per-category counts
//! - Filtered item listing
//! - Random draw with exclusions, 404 on exhaustion
//! - Point lookup by category and id
//! - 400 on unrecognized filter values, malformed exclusion keys and
//!   undecodable query strings

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use charades_common::Catalog;
use charades_server::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot` method

const MOVIES: &str = r#"{"movies": [
    {"id": 1, "title": "Inception", "year": 2010, "industry": "hollywood", "title_complexity": "simple",
     "actors": ["Leonardo DiCaprio"], "description": "Dreams within dreams."},
    {"id": 2, "title": "Sholay", "year": 1975, "industry": "bollywood"},
    {"id": 3, "title": "Zindagi Na Milegi Dobara", "year": 2011, "industry": "bollywood", "title_complexity": "complex"}
]}"#;
const SONGS: &str = r#"{"songs": [
    {"id": 1, "title": "Happy", "artist": "Pharrell Williams", "year": 2013, "industry": "international"}
]}"#;
const DIALOGUES: &str = r#"{"dialogues": [
    {"id": 1, "dialogue": "Kitne aadmi the?", "movie": "Sholay", "year": 1975, "industry": "bollywood"}
]}"#;

/// Test helper: Create app over a small fixed catalog
fn setup_app() -> axum::Router {
    let catalog = Catalog::from_json(MOVIES, SONGS, DIALOGUES).expect("test catalog is valid");
    build_router(AppState::new(Arc::new(catalog)))
}

/// Test helper: Create GET request
fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn request(uri: &str) -> (StatusCode, Value) {
    let response = setup_app().oneshot(get(uri)).await.unwrap();
    let status = response.status();
    (status, extract_json(response.into_body()).await)
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_reports_counts() {
    let (status, body) = request("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "charades-server");
    assert!(body["version"].is_string());
    assert_eq!(body["counts"]["movie"], 3);
    assert_eq!(body["counts"]["song"], 1);
    assert_eq!(body["counts"]["dialogue"], 1);
    assert_eq!(body["total"], 5);
}

#[tokio::test]
async fn test_buildinfo() {
    let (status, body) = request("/api/buildinfo").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["git_hash"].is_string());
    assert!(body["build_timestamp"].is_string());
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["build_profile"].is_string());
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_list_all_items_in_catalog_order() {
    let (status, body) = request("/items").await;

    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["movie:1", "movie:2", "movie:3", "song:1", "dialogue:1"]);
}

#[tokio::test]
async fn test_list_items_with_filters() {
    let (status, body) = request("/items?category=movies&industry=Bollywood&difficulty=difficult").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_u64().unwrap())
        .collect();
    // Sholay is old, ZNMD is complex
    assert_eq!(ids, vec![2, 3]);
}

#[tokio::test]
async fn test_list_items_any_sentinels() {
    let (status, body) = request("/items?category=mix&industry=any&decade=Any").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_item_serialization_shape() {
    let (_, body) = request("/items?category=movies&decade=2010s&difficulty=easy").await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);

    let inception = &items[0];
    assert_eq!(inception["key"], "movie:1");
    assert_eq!(inception["category"], "movie");
    assert_eq!(inception["display_text"], "Inception");
    assert_eq!(inception["industry"], "international");
    assert_eq!(inception["decade"], "2010s");
    assert_eq!(inception["title_complexity"], "simple");
    assert_eq!(inception["details"]["actors"][0], "Leonardo DiCaprio");
    assert_eq!(inception["reveal"][0]["label"], "Year");
    assert_eq!(inception["reveal"][0]["value"], "2010");
}

#[tokio::test]
async fn test_list_rejects_unknown_values() {
    for uri in [
        "/items?category=books",
        "/items?industry=tollywood",
        "/items?difficulty=medium",
        "/items?decade=1950s",
    ] {
        let (status, body) = request(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }
}

#[tokio::test]
async fn test_malformed_query_string_is_json_error() {
    for uri in [
        "/items?category=movies&category=songs",
        "/items/random?exclude=movie:1&exclude=movie:2",
    ] {
        let (status, body) = request(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert!(body["error"]["message"].is_string());
    }
}

// =============================================================================
// Random draw
// =============================================================================

#[tokio::test]
async fn test_random_respects_filters() {
    for _ in 0..20 {
        let (status, body) = request("/items/random?category=songs").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["key"], "song:1");
    }
}

#[tokio::test]
async fn test_random_respects_exclusions() {
    for _ in 0..20 {
        let (status, body) =
            request("/items/random?category=movies&exclude=movie:1,movie:3,song:2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["key"], "movie:2");
    }
}

#[tokio::test]
async fn test_random_exclusion_keys_are_per_category() {
    // song:1 shares id 1 with movie:1 and dialogue:1 but must not hide them
    let (status, body) = request("/items/random?category=dialogues&exclude=movie:1,song:1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["key"], "dialogue:1");
}

#[tokio::test]
async fn test_random_exhausted_is_404() {
    let (status, body) = request("/items/random?category=songs&exclude=song:1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_random_rejects_malformed_exclusion() {
    for uri in [
        "/items/random?exclude=1,2",
        "/items/random?exclude=movie:x",
        "/items/random?exclude=book:1",
    ] {
        let (status, _) = request(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }
}

// =============================================================================
// Lookup
// =============================================================================

#[tokio::test]
async fn test_get_item_by_category_and_id() {
    let (status, body) = request("/items/song/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display_text"], "Happy");
    assert_eq!(body["details"]["artist"], "Pharrell Williams");

    let (status, body) = request("/items/dialogues/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["details"]["movie"], "Sholay");
}

#[tokio::test]
async fn test_get_item_not_found() {
    let (status, body) = request("/items/movie/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_item_bad_path() {
    let (status, _) = request("/items/book/1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request("/items/movie/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
