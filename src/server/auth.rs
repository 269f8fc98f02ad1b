//! Bearer-token middleware for the recommendation route.
//!
//! Requires an `Authorization: Bearer <token>` header and verifies the token
//! with the shared [`TokenAuthority`] before the wrapped handler runs. A
//! missing header, a non-Bearer scheme, an empty token, and a token that
//! fails verification (expired, mis-signed, wrong algorithm, or malformed)
//! all yield the same 401 shape; the response never explains which check
//! failed.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use http::header::AUTHORIZATION;
use tracing::{debug, warn};

use crate::auth::TokenAuthority;

use super::handlers::ErrorResponse;

// =============================================================================
// Rejections
// =============================================================================

/// Authorization rejection reasons.
///
/// All map to 401; the distinction exists for logging only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No `Authorization` header on the request
    MissingToken,

    /// Header present but not a usable `Bearer <token>` value
    MalformedHeader,

    /// Token failed verification (expired, mis-signed, or unparsable)
    InvalidToken,
}

impl std::fmt::Display for AuthRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthRejection::MissingToken => write!(f, "Missing bearer token"),
            AuthRejection::MalformedHeader => write!(f, "Malformed Authorization header"),
            AuthRejection::InvalidToken => write!(f, "Invalid or expired token"),
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let status = StatusCode::UNAUTHORIZED;
        let (error_type, message) = match &self {
            AuthRejection::MissingToken => ("missing_token", self.to_string()),
            AuthRejection::MalformedHeader => ("malformed_header", self.to_string()),
            AuthRejection::InvalidToken => ("invalid_token", self.to_string()),
        };

        // A rejected token could indicate probing, so log at warn; absent
        // credentials are routine and stay at debug
        match &self {
            AuthRejection::InvalidToken => {
                warn!(
                    error_type = error_type,
                    status = status.as_u16(),
                    "Authorization failed: {}",
                    message
                );
            }
            _ => {
                debug!(
                    error_type = error_type,
                    status = status.as_u16(),
                    "Authorization failed: {}",
                    message
                );
            }
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);
        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Middleware
// =============================================================================

/// Pull the bearer token out of the request headers.
fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthRejection> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthRejection::MissingToken)?;

    let header = header
        .to_str()
        .map_err(|_| AuthRejection::MalformedHeader)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthRejection::MalformedHeader)?
        .trim();

    if token.is_empty() {
        return Err(AuthRejection::MalformedHeader);
    }

    Ok(token)
}

/// Axum middleware enforcing bearer-token authorization.
///
/// # Example
///
/// ```ignore
/// use axum::{middleware, routing::get, Router};
/// use geoplaces::auth::TokenAuthority;
/// use geoplaces::server::auth::bearer_middleware;
///
/// let auth = TokenAuthority::new("secret-key");
/// let app = Router::new()
///     .route("/api/recommend", get(recommend_handler))
///     .layer(middleware::from_fn_with_state(auth, bearer_middleware));
/// ```
pub async fn bearer_middleware(
    State(auth): State<TokenAuthority>,
    request: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let token = extract_bearer(request.headers())?;

    match auth.verify_token(token) {
        Ok(true) => Ok(next.run(request).await),
        Ok(false) => Err(AuthRejection::InvalidToken),
        Err(err) => {
            debug!("Token did not parse: {}", err);
            Err(AuthRejection::InvalidToken)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
