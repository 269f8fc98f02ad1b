//! Bearer-token issuance and verification.
//!
//! Tokens are JSON Web Tokens signed with HMAC-SHA256 over a shared secret,
//! carrying a fixed claim set:
//!
//! ```text
//! { "admin": true, "exp": <issued-at + 1h>, "name": "Ruslan" }
//! ```
//!
//! # Security Properties
//!
//! - **Algorithm pinning**: verification only accepts HS256. A token whose
//!   header names an asymmetric algorithm (or `none`) is rejected, which
//!   defeats signing-algorithm substitution attacks.
//! - **Time-limited**: tokens expire one hour after issuance. Expiry is
//!   checked against a caller-supplied clock in the `_at` variants so tests
//!   can cross the expiry boundary without sleeping.
//! - **Stateless**: validity is re-derived from the signature and expiry on
//!   every verification; nothing is persisted and there is no revocation.
//!
//! # Verification Semantics
//!
//! [`TokenAuthority::verify_token`] distinguishes two failure shapes:
//!
//! - `Ok(false)`: the input parsed as a token but is expired, mis-signed,
//!   or signed with an unexpected algorithm.
//! - `Err(TokenError::Malformed)`: the input could not be parsed as a
//!   token at all.
//!
//! Callers must treat both as unauthorized.
//!
//! # Example
//!
//! ```rust
//! use geoplaces::auth::TokenAuthority;
//!
//! let auth = TokenAuthority::new("my-secret-key");
//! let token = auth.issue_token().unwrap();
//! assert!(auth.verify_token(&token).unwrap());
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Token lifetime in seconds (1 hour).
pub const TOKEN_TTL_SECS: u64 = 3600;

/// Fixed `name` claim stamped into every issued token.
pub const TOKEN_NAME: &str = "Ruslan";

/// Claim set carried by every token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Administrative flag (always true for issued tokens).
    pub admin: bool,

    /// Expiry as Unix epoch seconds.
    pub exp: u64,

    /// Display name of the bearer.
    pub name: String,
}

/// Issues and verifies HS256-signed bearer tokens over a shared secret.
///
/// A pure function pair over a fixed secret; holds no other state.
#[derive(Clone)]
pub struct TokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenAuthority {
    /// Create a new authority with the given signing secret.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();

        // Expiry is checked manually against the caller's clock, so the
        // library's own exp validation (pinned to the system clock) is off.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a fresh token expiring [`TOKEN_TTL_SECS`] from now.
    pub fn issue_token(&self) -> Result<String, TokenError> {
        self.issue_token_at(unix_now())
    }

    /// Issue a token as of the given Unix timestamp.
    ///
    /// The token expires at `now + TOKEN_TTL_SECS`.
    pub fn issue_token_at(&self, now: u64) -> Result<String, TokenError> {
        let claims = Claims {
            admin: true,
            exp: now + TOKEN_TTL_SECS,
            name: TOKEN_NAME.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| TokenError::Signing(err.to_string()))
    }

    /// Verify a token's signature, algorithm, and expiry against the
    /// current system clock.
    pub fn verify_token(&self, token: &str) -> Result<bool, TokenError> {
        self.verify_token_at(token, unix_now())
    }

    /// Verify a token as of the given Unix timestamp.
    ///
    /// Returns `Ok(false)` for a well-formed token that is expired,
    /// mis-signed, or uses an unexpected algorithm; `Err` for input that
    /// does not parse as a token.
    pub fn verify_token_at(&self, token: &str, now: u64) -> Result<bool, TokenError> {
        let data = match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data,
            Err(err) => {
                return match err.kind() {
                    ErrorKind::InvalidSignature
                    | ErrorKind::InvalidAlgorithm
                    | ErrorKind::ExpiredSignature
                    | ErrorKind::ImmatureSignature => Ok(false),
                    _ => Err(TokenError::Malformed(err.to_string())),
                }
            }
        };

        Ok(data.claims.exp > now)
    }
}

/// Current time as Unix epoch seconds.
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before Unix epoch")
        .as_secs()
}
