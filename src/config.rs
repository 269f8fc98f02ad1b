//! Configuration management for the places service.
//!
//! This module provides a flexible configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables with `GEOPLACES_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Environment Variables
//!
//! - `GEOPLACES_HOST` - Server bind address (default: 0.0.0.0)
//! - `GEOPLACES_PORT` - Server port (default: 8888)
//! - `GEOPLACES_SECRET` - Shared secret for signing bearer tokens (required)
//! - `GEOPLACES_ELASTIC_URL` - Search index base URL (default: http://localhost:9200)
//! - `GEOPLACES_INDEX` - Index holding place documents (default: places)
//! - `GEOPLACES_CORS_ORIGINS` - Allowed CORS origins, comma-separated

use clap::Parser;

use crate::store::DEFAULT_INDEX;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8888;

/// Default search index base URL.
pub const DEFAULT_ELASTIC_URL: &str = "http://localhost:9200";

// =============================================================================
// CLI Arguments
// =============================================================================

/// geoplaces - a paginating, geo-recommending facade over a places index.
///
/// Serves a JSON API for listing and recommending places stored in an
/// Elasticsearch-compatible search index, with bearer-token authorization
/// on the recommendation route.
#[derive(Parser, Debug, Clone)]
#[command(name = "geoplaces")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "GEOPLACES_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "GEOPLACES_PORT")]
    pub port: u16,

    // =========================================================================
    // Authentication Configuration
    // =========================================================================
    /// Shared secret for signing bearer tokens.
    ///
    /// If not provided, the server will fail to start.
    #[arg(long, env = "GEOPLACES_SECRET")]
    pub secret: Option<String>,

    // =========================================================================
    // Search Store Configuration
    // =========================================================================
    /// Base URL of the search index.
    #[arg(long, default_value = DEFAULT_ELASTIC_URL, env = "GEOPLACES_ELASTIC_URL")]
    pub elastic_url: String,

    /// Index holding the place documents.
    #[arg(long, default_value = DEFAULT_INDEX, env = "GEOPLACES_INDEX")]
    pub index: String,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "GEOPLACES_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        match &self.secret {
            None => {
                return Err(
                    "A signing secret is required. Set --secret or GEOPLACES_SECRET".to_string(),
                )
            }
            Some(secret) if secret.is_empty() => {
                return Err("The signing secret must not be empty".to_string())
            }
            Some(_) => {}
        }

        if self.elastic_url.is_empty() {
            return Err(
                "Search index URL is required. Set --elastic-url or GEOPLACES_ELASTIC_URL"
                    .to_string(),
            );
        }

        if self.index.is_empty() {
            return Err("Index name must not be empty. Set --index or GEOPLACES_INDEX".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the signing secret, empty if not set (call validate() first).
    pub fn secret_or_empty(&self) -> &str {
        self.secret.as_deref().unwrap_or("")
    }
}

// =============================================================================
// Tests
// =============================================================================
