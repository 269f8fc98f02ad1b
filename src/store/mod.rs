//! Place store abstraction layer.
//!
//! This module provides a unified interface for reading place records out of
//! a search index, independent of the concrete backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             HTTP Handlers               │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │           PlaceStore Trait              │
//! │   (paged listing, geo-nearest lookup)   │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │             ElasticStore                │
//! │  (query-DSL search over HTTP, places    │
//! │   index, exact total-hit tracking)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The service only ever reads documents; ingestion happens entirely outside
//! this system.

mod elastic;

pub use elastic::{ElasticStore, DEFAULT_INDEX};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Geographic coordinates in floating-point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeoPoint {
    /// Longitude in degrees.
    pub lon: f64,

    /// Latitude in degrees.
    pub lat: f64,
}

/// A point-of-interest record as stored in the search index.
///
/// Immutable from the service's perspective; read per request and serialized
/// to clients with the same four-field shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Place {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub location: GeoPoint,
}

/// Capability interface over the place index.
///
/// Exactly one production implementation exists ([`ElasticStore`]); tests
/// substitute an in-memory mock.
#[async_trait]
pub trait PlaceStore: Send + Sync {
    /// Fetch one page of places.
    ///
    /// Returns the page slice together with the total number of matching
    /// documents, which the store tracks exactly (not estimated) and which
    /// is independent of `limit`/`offset`.
    async fn list_places(&self, limit: u32, offset: u32)
        -> Result<(Vec<Place>, u64), StoreError>;

    /// Fetch the places nearest to the given coordinates.
    ///
    /// Ordered by ascending great-circle distance, capped at a small fixed
    /// count. Documents without a location are skipped, and an index with no
    /// located documents yields an empty list, not an error.
    async fn recommend_nearest(&self, lon: f64, lat: f64) -> Result<Vec<Place>, StoreError>;
}
