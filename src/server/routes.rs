//! Router configuration for the places service.
//!
//! This module defines the HTTP routes and applies middleware for
//! authorization and CORS.
//!
//! # Route Structure
//!
//! ```text
//! /health              - Health check (public)
//! /api/places          - Paginated listing (public)
//! /api/get_token       - Token issuance (public)
//! /api/recommend       - Geo-nearest recommendation (bearer-protected)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use geoplaces::auth::TokenAuthority;
//! use geoplaces::server::routes::{create_router, RouterConfig};
//! use geoplaces::store::{ElasticStore, DEFAULT_INDEX};
//!
//! let store = ElasticStore::new("http://localhost:9200", DEFAULT_INDEX);
//! let auth = TokenAuthority::new("my-secret-key");
//!
//! let router = create_router(store, auth, RouterConfig::new());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8888").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{middleware, routing::get, Router};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::TokenAuthority;
use crate::store::PlaceStore;

use super::auth::bearer_middleware;
use super::handlers::{
    health_handler, places_handler, recommend_handler, token_handler, AppState,
};

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone, Default)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a router configuration with defaults:
    /// CORS allows any origin, tracing is enabled.
    pub fn new() -> Self {
        Self {
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// Builds the complete Axum router with public routes (listing, token
/// issuance, health), the bearer-protected recommendation route, CORS
/// configuration, and optional request tracing.
pub fn create_router<S>(store: S, auth: TokenAuthority, config: RouterConfig) -> Router
where
    S: PlaceStore + 'static,
{
    let state = AppState::new(store, auth.clone());
    let cors = build_cors_layer(&config);

    // Protected route; the layer only wraps routes registered above it
    let protected_routes = Router::new()
        .route("/api/recommend", get(recommend_handler::<S>))
        .layer(middleware::from_fn_with_state(auth, bearer_middleware))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/api/places", get(places_handler::<S>))
        .route("/api/get_token", get(token_handler::<S>))
        .route("/health", get(health_handler))
        .with_state(state);

    let router = Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => {
            // No origins allowed - this effectively disables CORS
            cors
        }
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
