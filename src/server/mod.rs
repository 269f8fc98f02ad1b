//! HTTP server layer for the places service.
//!
//! This module provides the JSON API over the place store and the token
//! authority.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │   GET /api/places   GET /api/recommend   GET /api/get_token     │
//! │                                                                 │
//! │  ┌─────────────┐  ┌──────────────┐  ┌────────────────────────┐  │
//! │  │  handlers   │  │     auth     │  │        routes          │  │
//! │  │ (requests)  │  │ (bearer mw)  │  │   (router config)      │  │
//! │  └─────────────┘  └──────────────┘  └────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::{bearer_middleware, AuthRejection};
pub use handlers::{
    health_handler, places_handler, recommend_handler, token_handler, ApiError, AppState,
    ErrorResponse, HealthResponse, PlacesQueryParams, PlacesResponse, RecommendQueryParams,
    RecommendResponse, TokenResponse, PAGE_SIZE,
};
pub use routes::{create_router, RouterConfig};
