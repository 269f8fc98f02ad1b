//! # geoplaces
//!
//! A small web service that paginates and geo-recommends place records
//! stored in an Elasticsearch-compatible search index, gated by a minimal
//! bearer-token authorization scheme.
//!
//! ## Endpoints
//!
//! - `GET /api/places?page=N` - paginated listing, fixed page size of 10
//! - `GET /api/recommend?lat=..&lon=..` - the three places nearest to a
//!   coordinate, bearer-token protected
//! - `GET /api/get_token` - issues a signed one-hour token
//! - `GET /health` - health check
//!
//! ## Architecture
//!
//! The library is organized into a few small modules:
//!
//! - [`auth`] - Token authority (HS256 JWT issuance and verification)
//! - [`store`] - Place store trait and the Elasticsearch query client
//! - [`server`] - Axum handlers, bearer middleware, and routes
//! - [`config`] - CLI and configuration types
//! - [`error`] - Store and token error types
//!
//! Data flows one way per request: HTTP query → handler → (token authority |
//! place store) → JSON response. Handlers share no mutable state; the only
//! long-lived resources are the store's HTTP client and the signing secret.
//!
//! ## Example
//!
//! ```rust,no_run
//! use geoplaces::auth::TokenAuthority;
//! use geoplaces::server::{create_router, RouterConfig};
//! use geoplaces::store::{ElasticStore, DEFAULT_INDEX};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = ElasticStore::new("http://localhost:9200", DEFAULT_INDEX);
//!     let auth = TokenAuthority::new("my-secret-key");
//!     let router = create_router(store, auth, RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8888").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use auth::{Claims, TokenAuthority, TOKEN_NAME, TOKEN_TTL_SECS};
pub use config::Config;
pub use error::{StoreError, TokenError};
pub use server::{
    bearer_middleware, create_router, ApiError, AppState, AuthRejection, ErrorResponse,
    HealthResponse, PlacesResponse, RecommendResponse, RouterConfig, TokenResponse, PAGE_SIZE,
};
pub use store::{ElasticStore, GeoPoint, Place, PlaceStore, DEFAULT_INDEX};
