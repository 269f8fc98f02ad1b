//! Elasticsearch-backed place store.
//!
//! Talks to the index over its HTTP query-DSL endpoint. Two query shapes are
//! issued: a paged match-all listing and a geo-distance-sorted nearest
//! lookup. Hits are mapped field-for-field into domain [`Place`] records;
//! no filtering or re-validation happens beyond that mapping.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::StoreError;

use super::{GeoPoint, Place, PlaceStore};

/// Index queried for place documents.
pub const DEFAULT_INDEX: &str = "places";

/// Result cap for nearest-neighbor recommendations.
const RECOMMEND_SIZE: u32 = 3;

/// Elasticsearch implementation of [`PlaceStore`].
///
/// Holds a long-lived HTTP client; no other state survives across requests.
///
/// # Example
///
/// ```ignore
/// use geoplaces::store::{ElasticStore, PlaceStore, DEFAULT_INDEX};
///
/// let store = ElasticStore::new("http://localhost:9200", DEFAULT_INDEX);
/// store.ping().await?;
/// let (places, total) = store.list_places(10, 0).await?;
/// ```
#[derive(Clone)]
pub struct ElasticStore {
    http: reqwest::Client,
    base_url: String,
    index: String,
}

impl ElasticStore {
    /// Create a new store client for the given base URL and index.
    pub fn new(base_url: impl Into<String>, index: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            index: index.into(),
        }
    }

    /// Get the index name this store queries.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Probe the store for reachability.
    ///
    /// Used once at startup; per-request failures surface through the
    /// individual operations instead.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let response = self
            .http
            .get(&self.base_url)
            .send()
            .await
            .map_err(|err| StoreError::Connection(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Query {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    /// Execute a search request against the index.
    ///
    /// `track_total_hits` is always on so the reported total is exact
    /// rather than the store's default lower-bound estimate.
    async fn search(&self, body: &Value) -> Result<SearchResponse, StoreError> {
        let url = format!(
            "{}/{}/_search?track_total_hits=true",
            self.base_url, self.index
        );

        debug!(index = %self.index, "executing search query");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| StoreError::Connection(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Query {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|err| StoreError::Decode(err.to_string()))
    }
}

#[async_trait]
impl PlaceStore for ElasticStore {
    async fn list_places(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<(Vec<Place>, u64), StoreError> {
        let response = self.search(&list_query(limit, offset)).await?;

        let total = response.hits.total.value;
        let places = response
            .hits
            .hits
            .into_iter()
            .map(|hit| hit.source.into())
            .collect();

        Ok((places, total))
    }

    async fn recommend_nearest(&self, lon: f64, lat: f64) -> Result<Vec<Place>, StoreError> {
        let response = self.search(&nearest_query(lon, lat)).await?;

        Ok(response
            .hits
            .hits
            .into_iter()
            .map(|hit| hit.source.into())
            .collect())
    }
}

// =============================================================================
// Query Bodies
// =============================================================================

/// Paged match-all listing.
///
/// The explicit `_doc` sort pins pages to document order so the same page
/// number yields the same slice across requests.
fn list_query(limit: u32, offset: u32) -> Value {
    json!({
        "size": limit,
        "from": offset,
        "sort": ["_doc"],
    })
}

/// Geo-distance-sorted nearest lookup.
///
/// The `exists` filter drops documents without coordinates; `ignore_unmapped`
/// keeps the sort from erroring on an index that has no `location` mapping at
/// all. Together they make "no located documents" an empty result.
fn nearest_query(lon: f64, lat: f64) -> Value {
    json!({
        "size": RECOMMEND_SIZE,
        "query": {
            "bool": {
                "filter": {
                    "exists": { "field": "location" }
                }
            }
        },
        "sort": [
            {
                "_geo_distance": {
                    "location": { "lat": lat, "lon": lon },
                    "order": "asc",
                    "unit": "km",
                    "mode": "min",
                    "distance_type": "arc",
                    "ignore_unmapped": true,
                }
            }
        ],
    })
}

// =============================================================================
// Wire Model
// =============================================================================

/// Envelope of a `_search` response; only the parts this service reads.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    total: TotalHits,
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct TotalHits {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: PlaceDoc,
}

/// A place document as stored in the index.
///
/// Fields default when absent; the mapping never drops a hit.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PlaceDoc {
    name: String,
    address: String,
    phone: String,
    location: GeoDoc,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GeoDoc {
    lon: f64,
    lat: f64,
}

impl From<PlaceDoc> for Place {
    fn from(doc: PlaceDoc) -> Self {
        Place {
            name: doc.name,
            address: doc.address,
            phone: doc.phone,
            location: GeoPoint {
                lon: doc.location.lon,
                lat: doc.location.lat,
            },
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
