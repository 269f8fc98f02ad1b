use thiserror::Error;

/// Errors that can occur when talking to the search store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Network or connection error reaching the store
    #[error("Connection error: {0}")]
    Connection(String),

    /// The store answered the search request with a non-2xx status
    #[error("Search query failed with status {status}: {body}")]
    Query { status: u16, body: String },

    /// The store answered 2xx but the body did not match the expected shape
    #[error("Malformed search response: {0}")]
    Decode(String),
}

/// Errors from issuing or parsing bearer tokens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The signing primitive failed (practically never with a valid secret)
    #[error("Token signing failed: {0}")]
    Signing(String),

    /// Input that cannot be parsed as a token at all
    ///
    /// Distinct from a well-formed token that merely fails verification;
    /// that case is reported as a clean "invalid" verdict, not an error.
    #[error("Malformed token: {0}")]
    Malformed(String),
}
