//! Movie API End-to-End Tests
//!
//! Drives the full router, origin gate included, through
//! `tower::ServiceExt` without binding a socket. Covers:
//! - The greeting route and the plain-text fallback
//! - Listing with title/genre filters and their precedence
//! - Create/patch/delete contracts, including validation status codes
//! - The cross-origin gate running before any handler

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use marquee::http::{AppState, router};
use marquee::models::{Genre, Movie, MovieId};
use marquee::store::{CatalogBackend, InMemoryCatalog};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const ALLOWED_ORIGIN: &str = "https://movies.com";

fn sample_movies() -> Vec<Movie> {
    vec![
        Movie {
            id: MovieId::from("matrix-id"),
            title: "The Matrix".to_string(),
            year: 1999,
            director: "Lana Wachowski".to_string(),
            duration: 136,
            rate: 8.7,
            poster: Some("https://example.com/matrix.jpg".to_string()),
            genre: vec![Genre::Action, Genre::SciFi],
        },
        Movie {
            id: MovieId::from("inception-id"),
            title: "Inception".to_string(),
            year: 2010,
            director: "Christopher Nolan".to_string(),
            duration: 148,
            rate: 8.8,
            poster: Some("https://example.com/inception.jpg".to_string()),
            genre: vec![Genre::SciFi, Genre::Adventure],
        },
        Movie {
            id: MovieId::from("heat-id"),
            title: "Heat".to_string(),
            year: 1995,
            director: "Michael Mann".to_string(),
            duration: 170,
            rate: 8.3,
            poster: None,
            genre: vec![Genre::Crime, Genre::Drama],
        },
    ]
}

fn test_app() -> (Arc<InMemoryCatalog>, Router) {
    let catalog = Arc::new(InMemoryCatalog::with_movies(sample_movies()));
    let state = AppState::new(catalog.clone(), vec![ALLOWED_ORIGIN.to_string()]);
    (catalog, router(state))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send_json(app: Router, method: Method, uri: &str, body: &Value) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

fn as_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

// ============================================================================
// Greeting and Fallback
// ============================================================================

mod routing {
    use super::*;

    #[tokio::test]
    async fn test_root_greets() {
        let (_, app) = test_app();
        let (status, body) = get(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body), json!({ "message": "Hola mundo" }));
    }

    #[tokio::test]
    async fn test_unmatched_route_is_plain_text_404() {
        let (_, app) = test_app();
        let (status, body) = get(app, "/nonexistent").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, b"Sorry cant find that!");
    }
}

// ============================================================================
// Listing and Filters
// ============================================================================

mod listing {
    use super::*;

    #[tokio::test]
    async fn test_lists_all_movies_in_order() {
        let (_, app) = test_app();
        let (status, body) = get(app, "/movies").await;

        assert_eq!(status, StatusCode::OK);
        let movies = as_json(&body);
        let titles: Vec<&str> = movies
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["The Matrix", "Inception", "Heat"]);
    }

    #[tokio::test]
    async fn test_title_filter_is_case_insensitive_substring() {
        let (_, app) = test_app();
        let (status, body) = get(app, "/movies?title=matrix").await;

        assert_eq!(status, StatusCode::OK);
        let movies = as_json(&body);
        assert_eq!(movies.as_array().unwrap().len(), 1);
        assert_eq!(movies[0]["title"], "The Matrix");
    }

    #[tokio::test]
    async fn test_genre_filter_is_case_insensitive_exact() {
        let (_, app) = test_app();
        let (status, body) = get(app, "/movies?genre=sci-fi").await;

        assert_eq!(status, StatusCode::OK);
        let movies = as_json(&body);
        let titles: Vec<&str> = movies
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["The Matrix", "Inception"]);
    }

    #[tokio::test]
    async fn test_title_filter_wins_over_genre() {
        let (_, app) = test_app();
        let (status, body) = get(app, "/movies?title=heat&genre=sci-fi").await;

        assert_eq!(status, StatusCode::OK);
        let movies = as_json(&body);
        assert_eq!(movies.as_array().unwrap().len(), 1);
        assert_eq!(movies[0]["title"], "Heat");
    }

    #[tokio::test]
    async fn test_no_match_yields_empty_array_not_error() {
        let (_, app) = test_app();
        let (status, body) = get(app, "/movies?genre=Western").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body), json!([]));
    }

    #[tokio::test]
    async fn test_empty_title_param_counts_as_absent() {
        let (_, app) = test_app();
        let (status, body) = get(app, "/movies?title=").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body).as_array().unwrap().len(), 3);
    }
}

// ============================================================================
// Single-Record Fetch
// ============================================================================

mod fetch {
    use super::*;

    #[tokio::test]
    async fn test_fetches_by_id() {
        let (_, app) = test_app();
        let (status, body) = get(app, "/movies/inception-id").await;

        assert_eq!(status, StatusCode::OK);
        let movie = as_json(&body);
        assert_eq!(movie["title"], "Inception");
        assert_eq!(movie["genre"], json!(["Sci-Fi", "Adventure"]));
    }

    #[tokio::test]
    async fn test_unknown_id_is_404() {
        let (_, app) = test_app();
        let (status, body) = get(app, "/movies/does-not-exist").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(as_json(&body), json!({ "message": "Movie not found" }));
    }
}

// ============================================================================
// Create
// ============================================================================

mod create {
    use super::*;

    fn new_movie() -> Value {
        json!({
            "title": "Alien",
            "year": 1979,
            "director": "Ridley Scott",
            "duration": 117,
            "rate": 8.5,
            "poster": "https://example.com/alien.jpg",
            "genre": ["Horror", "Sci-Fi"]
        })
    }

    #[tokio::test]
    async fn test_create_returns_201_with_fresh_id() {
        let (catalog, app) = test_app();
        let (status, body) = send_json(app, Method::POST, "/movies", &new_movie()).await;

        assert_eq!(status, StatusCode::CREATED);
        let created = as_json(&body);
        let id = created["id"].as_str().unwrap();
        assert!(!id.is_empty());

        // Every field except the generated id equals the input.
        assert_eq!(created["title"], "Alien");
        assert_eq!(created["year"], 1979);
        assert_eq!(created["duration"], 117);
        assert_eq!(created["genre"], json!(["Horror", "Sci-Fi"]));

        // The record is retrievable and the store grew by one.
        let stored = catalog.get(&MovieId::from(id)).unwrap().unwrap();
        assert_eq!(stored.title, "Alien");
        assert_eq!(catalog.list().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_create_ids_are_unique() {
        let (_, app) = test_app();
        let (_, first) = send_json(app.clone(), Method::POST, "/movies", &new_movie()).await;
        let (_, second) = send_json(app, Method::POST, "/movies", &new_movie()).await;

        assert_ne!(as_json(&first)["id"], as_json(&second)["id"]);
    }

    #[tokio::test]
    async fn test_create_applies_default_rate() {
        let (_, app) = test_app();
        let mut payload = new_movie();
        payload.as_object_mut().unwrap().remove("rate");

        let (status, body) = send_json(app, Method::POST, "/movies", &payload).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(as_json(&body)["rate"], 5.5);
    }

    #[tokio::test]
    async fn test_missing_title_is_422_and_store_unchanged() {
        let (catalog, app) = test_app();
        let mut payload = new_movie();
        payload.as_object_mut().unwrap().remove("title");

        let (status, body) = send_json(app, Method::POST, "/movies", &payload).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let errors = as_json(&body);
        assert!(
            errors["error"]
                .as_array()
                .unwrap()
                .iter()
                .any(|e| e["field"] == "title"),
            "expected an error entry referencing title, got {errors}"
        );
        assert_eq!(catalog.list().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unrecognized_field_is_422() {
        let (_, app) = test_app();
        let mut payload = new_movie();
        payload["producer"] = json!("Gordon Carroll");

        let (status, _) = send_json(app, Method::POST, "/movies", &payload).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}

// ============================================================================
// Partial Update
// ============================================================================

mod update {
    use super::*;

    #[tokio::test]
    async fn test_empty_patch_returns_record_unchanged() {
        let (catalog, app) = test_app();
        let before = catalog.get(&MovieId::from("heat-id")).unwrap().unwrap();

        let (status, body) = send_json(app, Method::PATCH, "/movies/heat-id", &json!({})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body), serde_json::to_value(&before).unwrap());
    }

    #[tokio::test]
    async fn test_patch_merges_only_present_fields() {
        let (catalog, app) = test_app();
        let (status, body) = send_json(
            app,
            Method::PATCH,
            "/movies/heat-id",
            &json!({ "rate": 9.0 }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let merged = as_json(&body);
        assert_eq!(merged["rate"], 9.0);
        assert_eq!(merged["title"], "Heat");
        assert_eq!(merged["id"], "heat-id");

        let stored = catalog.get(&MovieId::from("heat-id")).unwrap().unwrap();
        assert!((stored.rate - 9.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_patch_unknown_id_is_404_even_with_valid_body() {
        let (_, app) = test_app();
        let (status, _) = send_json(
            app,
            Method::PATCH,
            "/movies/does-not-exist",
            &json!({ "rate": 9.0 }),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_patch_body_is_400() {
        let (_, app) = test_app();
        let (status, body) = send_json(
            app,
            Method::PATCH,
            "/movies/heat-id",
            &json!({ "year": 1500 }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(as_json(&body)["error"].is_array());
    }

    #[tokio::test]
    async fn test_patch_cannot_rewrite_identifier() {
        let (catalog, app) = test_app();
        let (status, _) = send_json(
            app,
            Method::PATCH,
            "/movies/heat-id",
            &json!({ "id": "hijacked" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(catalog.get(&MovieId::from("heat-id")).unwrap().is_some());
    }
}

// ============================================================================
// Delete
// ============================================================================

mod removal {
    use super::*;

    #[tokio::test]
    async fn test_delete_is_204_and_removes_exactly_one() {
        let (catalog, app) = test_app();

        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/movies/inception-id")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app.clone(), request).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());
        assert!(catalog.get(&MovieId::from("inception-id")).unwrap().is_none());

        // Remaining records keep their relative order.
        let (_, body) = get(app, "/movies").await;
        let parsed = as_json(&body);
        let titles: Vec<&str> = parsed
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["The Matrix", "Heat"]);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_404() {
        let (_, app) = test_app();
        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/movies/does-not-exist")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(as_json(&body), json!({ "message": "Movie not found" }));
    }
}

// ============================================================================
// Cross-Origin Policy
// ============================================================================

mod cross_origin {
    use super::*;

    #[tokio::test]
    async fn test_undeclared_origin_is_rejected_before_any_handler() {
        let (catalog, app) = test_app();

        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/movies/heat-id")
            .header(header::ORIGIN, "http://evil.example")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(as_json(&body), json!({ "message": "Not allowed by CORS" }));

        // The delete handler never ran.
        assert!(catalog.get(&MovieId::from("heat-id")).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_allowed_origin_passes_with_cors_header() {
        let (_, app) = test_app();

        let request = Request::builder()
            .uri("/movies")
            .header(header::ORIGIN, ALLOWED_ORIGIN)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some(ALLOWED_ORIGIN)
        );
    }

    #[tokio::test]
    async fn test_request_without_origin_is_allowed() {
        let (_, app) = test_app();
        let (status, _) = get(app, "/movies").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejected_origin_applies_to_every_route() {
        let (_, app) = test_app();

        let request = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "http://evil.example")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(app, request).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
