//! HTTP request handlers for the places API.
//!
//! # Endpoints
//!
//! - `GET /api/places?page=N` - Paginated place listing
//! - `GET /api/recommend?lat=..&lon=..` - Geo-nearest recommendation (protected)
//! - `GET /api/get_token` - Bearer-token issuance
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::auth::TokenAuthority;
use crate::error::{StoreError, TokenError};
use crate::store::{Place, PlaceStore};

// =============================================================================
// Application State
// =============================================================================

/// Number of places per listing page.
pub const PAGE_SIZE: u32 = 10;

/// Shared application state passed to all handlers via Axum's State extractor.
pub struct AppState<S: PlaceStore> {
    /// The place store queried by the data endpoints
    pub store: Arc<S>,

    /// Token authority for issuance on `/api/get_token`
    pub auth: TokenAuthority,
}

impl<S: PlaceStore> AppState<S> {
    /// Create a new application state from a store and a token authority.
    pub fn new(store: S, auth: TokenAuthority) -> Self {
        Self {
            store: Arc::new(store),
            auth,
        }
    }
}

impl<S: PlaceStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            auth: self.auth.clone(),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for the listing endpoint.
///
/// `page` is kept as a raw string so parse failures produce this service's
/// own 400 body rather than the extractor's.
#[derive(Debug, Deserialize)]
pub struct PlacesQueryParams {
    #[serde(default)]
    pub page: Option<String>,
}

/// Query parameters for the recommendation endpoint.
#[derive(Debug, Deserialize)]
pub struct RecommendQueryParams {
    #[serde(default)]
    pub lat: Option<String>,

    #[serde(default)]
    pub lon: Option<String>,
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "invalid_page", "store_unavailable")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: None,
        }
    }

    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Response from the paginated listing endpoint.
///
/// `prev_page`/`next_page` are omitted at the respective boundary rather than
/// carried as zero or null.
#[derive(Debug, Serialize)]
pub struct PlacesResponse {
    pub name: String,

    /// Exact total document count for the query, independent of the page.
    pub total: u64,

    pub places: Vec<Place>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<u32>,

    pub last_page: u32,
}

/// Response from the recommendation endpoint.
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub name: String,
    pub places: Vec<Place>,
}

/// Response from the token issuance endpoint.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Handler-level errors, classified for response mapping.
///
/// Client input errors carry their message to the caller verbatim;
/// dependency failures return a generic message and keep the detail in the
/// server log only.
#[derive(Debug)]
pub enum ApiError {
    /// `page` missing, unparsable, or below 1
    InvalidPage,

    /// `page` beyond the last page for the current total
    PageOutOfRange { page: u32, last_page: u32 },

    /// `lat` or `lon` missing from the query
    MissingCoordinates,

    /// `lat` present but not a finite float
    InvalidLatitude,

    /// `lon` present but not a finite float
    InvalidLongitude,

    /// The search store failed (transport or query error)
    Store(StoreError),

    /// Token issuance failed
    Token(TokenError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::Token(err)
    }
}

/// Convert ApiError to HTTP response.
///
/// 4xx errors are logged at WARN level (client errors), 5xx at ERROR level
/// (dependency failures) together with the internal detail that is withheld
/// from the response body.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::InvalidPage => (
                StatusCode::BAD_REQUEST,
                "invalid_page",
                "page must be a positive integer".to_string(),
            ),

            ApiError::PageOutOfRange { page, last_page } => (
                StatusCode::BAD_REQUEST,
                "page_out_of_range",
                format!("page {} is out of range (last page is {})", page, last_page),
            ),

            ApiError::MissingCoordinates => (
                StatusCode::BAD_REQUEST,
                "missing_coordinates",
                "both lat and lon query parameters are required".to_string(),
            ),

            ApiError::InvalidLatitude => (
                StatusCode::BAD_REQUEST,
                "invalid_latitude",
                "lat must be a finite number".to_string(),
            ),

            ApiError::InvalidLongitude => (
                StatusCode::BAD_REQUEST,
                "invalid_longitude",
                "lon must be a finite number".to_string(),
            ),

            ApiError::Store(err) => {
                error!(error_type = "store_unavailable", "Store error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "store_unavailable",
                    "search store is unavailable".to_string(),
                )
            }

            ApiError::Token(err) => {
                error!(error_type = "token_unavailable", "Token error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "token_unavailable",
                    "token could not be issued".to_string(),
                )
            }
        };

        if status.is_client_error() {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                message
            );
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);
        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Last page number for a total document count.
///
/// Integer division plus one: this counts a trailing page even when `total`
/// is an exact multiple of the page size (20 documents paginate as three
/// pages, the third empty). Long-standing behavior that clients key off;
/// kept as-is.
fn last_page(total: u64) -> u32 {
    (total / PAGE_SIZE as u64) as u32 + 1
}

/// Previous/next page numbers, absent at the respective boundary.
fn page_window(page: u32, last_page: u32) -> (Option<u32>, Option<u32>) {
    let prev = (page > 1).then(|| page - 1);
    let next = (page < last_page).then(|| page + 1);
    (prev, next)
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle paginated listing requests.
///
/// # Endpoint
///
/// `GET /api/places?page=N`
///
/// # Query Parameters
///
/// - `page`: 1-based page number (required, integer ≥ 1)
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "name": "Places",
///   "total": 1397,
///   "places": [{"Name": "...", "Address": "...", "Phone": "...",
///               "Location": {"Lon": 20.0, "Lat": 10.0}}],
///   "prev_page": 1,
///   "next_page": 3,
///   "last_page": 140
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing/unparsable page, or page out of range
/// - `500 Internal Server Error`: store failure
pub async fn places_handler<S: PlaceStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<PlacesQueryParams>,
) -> Result<Json<PlacesResponse>, ApiError> {
    // Validated before any store round-trip
    let page: u32 = query
        .page
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| ApiError::InvalidPage)?;
    if page < 1 {
        return Err(ApiError::InvalidPage);
    }

    let offset = (page - 1) * PAGE_SIZE;
    let (places, total) = state.store.list_places(PAGE_SIZE, offset).await?;

    let last_page = last_page(total);
    if page > last_page {
        return Err(ApiError::PageOutOfRange { page, last_page });
    }

    let (prev_page, next_page) = page_window(page, last_page);

    Ok(Json(PlacesResponse {
        name: "Places".to_string(),
        total,
        places,
        prev_page,
        next_page,
        last_page,
    }))
}

/// Handle geo-nearest recommendation requests.
///
/// # Endpoint
///
/// `GET /api/recommend?lat=..&lon=..` (bearer-token protected)
///
/// # Query Parameters
///
/// - `lat`: latitude in degrees (required, finite float)
/// - `lon`: longitude in degrees (required, finite float)
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "name": "Recommendation",
///   "places": [{"Name": "...", "Address": "...", "Phone": "...",
///               "Location": {"Lon": 20.0, "Lat": 10.0}}]
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing or unparsable coordinates (store not queried)
/// - `401 Unauthorized`: missing/invalid bearer token (rejected in middleware)
/// - `500 Internal Server Error`: store failure
pub async fn recommend_handler<S: PlaceStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<RecommendQueryParams>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let lat = query
        .lat
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingCoordinates)?;
    let lon = query
        .lon
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingCoordinates)?;

    let lat: f64 = lat.parse().map_err(|_| ApiError::InvalidLatitude)?;
    if !lat.is_finite() {
        return Err(ApiError::InvalidLatitude);
    }
    let lon: f64 = lon.parse().map_err(|_| ApiError::InvalidLongitude)?;
    if !lon.is_finite() {
        return Err(ApiError::InvalidLongitude);
    }

    let places = state.store.recommend_nearest(lon, lat).await?;

    Ok(Json(RecommendResponse {
        name: "Recommendation".to_string(),
        places,
    }))
}

/// Handle token issuance requests.
///
/// # Endpoint
///
/// `GET /api/get_token`
///
/// Unauthenticated: any caller receives a valid token, with no credential
/// check and no rate limit. Reproduced as-is from the service this replaces.
///
/// # Response
///
/// `200 OK` with JSON body `{"token": "<jwt>"}`.
///
/// # Errors
///
/// - `500 Internal Server Error`: signing failure
pub async fn token_handler<S: PlaceStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.auth.issue_token()?;
    Ok(Json(TokenResponse { token }))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
