//! Integration tests for token issuance.
//!
//! Tests verify:
//! - Any caller receives a fresh token with no credential check
//! - Issued tokens verify against the configured secret
//! - An issued token opens the protected recommendation route

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use geoplaces::auth::TokenAuthority;

use super::test_utils::{build_router, sample_places, MockPlaceStore, TEST_SECRET};

/// Fetch a token from the issuance endpoint.
async fn fetch_token(router: axum::Router) -> String {
    let request = Request::builder()
        .uri("/api/get_token")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    json["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_token_issued_unconditionally() {
    let store = MockPlaceStore::new();
    let router = build_router(store);

    let token = fetch_token(router).await;

    assert!(!token.is_empty());
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn test_issued_token_verifies() {
    let store = MockPlaceStore::new();
    let router = build_router(store);

    let token = fetch_token(router).await;

    let auth = TokenAuthority::new(TEST_SECRET);
    assert_eq!(auth.verify_token(&token), Ok(true));
}

#[tokio::test]
async fn test_issued_token_opens_protected_route() {
    let store = MockPlaceStore::new().with_places(sample_places(5));
    let router = build_router(store);

    let token = fetch_token(router.clone()).await;

    let request = Request::builder()
        .uri("/api/recommend?lat=10.0&lon=20.0")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["name"], "Recommendation");
}

#[tokio::test]
async fn test_each_call_issues_a_usable_token() {
    let store = MockPlaceStore::new();
    let router = build_router(store);

    let auth = TokenAuthority::new(TEST_SECRET);
    for _ in 0..3 {
        let token = fetch_token(router.clone()).await;
        assert_eq!(auth.verify_token(&token), Ok(true));
    }
}
