//! Integration tests for the geo-nearest recommendation endpoint.
//!
//! Tests verify:
//! - At most three places are returned, each with a location
//! - Coordinates are validated before any store call
//! - Coordinates pass through to the store unswapped
//! - Store failures surface as 500

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use geoplaces::auth::TokenAuthority;

use super::test_utils::{build_router, sample_places, MockPlaceStore, TEST_SECRET};

/// A valid bearer header value for the shared test secret.
fn bearer() -> String {
    let token = TokenAuthority::new(TEST_SECRET).issue_token().unwrap();
    format!("Bearer {}", token)
}

// =============================================================================
// Successful Recommendations
// =============================================================================

#[tokio::test]
async fn test_recommend_caps_at_three_places() {
    let store = MockPlaceStore::new().with_places(sample_places(8));
    let router = build_router(store);

    let request = Request::builder()
        .uri("/api/recommend?lat=10.0&lon=20.0")
        .header(header::AUTHORIZATION, bearer())
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["name"], "Recommendation");

    let places = json["places"].as_array().unwrap();
    assert!(places.len() <= 3);
    for place in places {
        assert!(place["Location"]["Lon"].is_number());
        assert!(place["Location"]["Lat"].is_number());
    }

    // No pagination metadata on recommendations
    assert!(json.get("total").is_none());
    assert!(json.get("last_page").is_none());
}

#[tokio::test]
async fn test_coordinates_pass_through_unswapped() {
    let store = MockPlaceStore::new().with_places(sample_places(3));
    let router = build_router(store.clone());

    let request = Request::builder()
        .uri("/api/recommend?lat=10.5&lon=20.25")
        .header(header::AUTHORIZATION, bearer())
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Store receives (lon, lat)
    assert_eq!(store.last_recommend_args().await, Some((20.25, 10.5)));
}

#[tokio::test]
async fn test_unlocated_corpus_yields_empty_list() {
    let store = MockPlaceStore::new();
    let router = build_router(store);

    let request = Request::builder()
        .uri("/api/recommend?lat=10.0&lon=20.0")
        .header(header::AUTHORIZATION, bearer())
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["places"].as_array().unwrap().len(), 0);
}

// =============================================================================
// Coordinate Validation
// =============================================================================

#[tokio::test]
async fn test_missing_lat_rejected_before_store_call() {
    let store = MockPlaceStore::new().with_places(sample_places(3));
    let router = build_router(store.clone());

    let request = Request::builder()
        .uri("/api/recommend?lon=20.0")
        .header(header::AUTHORIZATION, bearer())
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.recommend_calls(), 0);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "missing_coordinates");
}

#[tokio::test]
async fn test_missing_lon_rejected_before_store_call() {
    let store = MockPlaceStore::new().with_places(sample_places(3));
    let router = build_router(store.clone());

    let request = Request::builder()
        .uri("/api/recommend?lat=10.0")
        .header(header::AUTHORIZATION, bearer())
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.recommend_calls(), 0);
}

#[tokio::test]
async fn test_unparsable_latitude_rejected() {
    let store = MockPlaceStore::new().with_places(sample_places(3));
    let router = build_router(store.clone());

    let request = Request::builder()
        .uri("/api/recommend?lat=north&lon=20.0")
        .header(header::AUTHORIZATION, bearer())
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.recommend_calls(), 0);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "invalid_latitude");
}

#[tokio::test]
async fn test_unparsable_longitude_rejected() {
    let store = MockPlaceStore::new().with_places(sample_places(3));
    let router = build_router(store.clone());

    let request = Request::builder()
        .uri("/api/recommend?lat=10.0&lon=east")
        .header(header::AUTHORIZATION, bearer())
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "invalid_longitude");
}

#[tokio::test]
async fn test_non_finite_coordinates_rejected() {
    let store = MockPlaceStore::new().with_places(sample_places(3));
    let router = build_router(store.clone());

    for query in ["lat=NaN&lon=20.0", "lat=10.0&lon=inf"] {
        let request = Request::builder()
            .uri(format!("/api/recommend?{}", query))
            .header(header::AUTHORIZATION, bearer())
            .body(Body::empty())
            .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "query={:?}", query);
    }

    assert_eq!(store.recommend_calls(), 0);
}

// =============================================================================
// Store Failures
// =============================================================================

#[tokio::test]
async fn test_store_failure_returns_500() {
    let store = MockPlaceStore::new().failing();
    let router = build_router(store);

    let request = Request::builder()
        .uri("/api/recommend?lat=10.0&lon=20.0")
        .header(header::AUTHORIZATION, bearer())
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "store_unavailable");
    assert!(error.get("places").is_none());
}
