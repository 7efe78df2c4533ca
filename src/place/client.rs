//! Places-search API client (Geoapify `v2/places`).
//!
//! One blocking GET per search: circular geofence, category filter,
//! result limit and an optional proximity bias. Response features are
//! translated into [`PlaceRecord`]s or [`PlaceSummary`]s.

use super::types::{PlaceRecord, PlaceSummary, SearchError, SearchQuery, UNNAMED_PLACE};
use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "https://api.geoapify.com/v2/places";

const USER_AGENT: &str = concat!("GeoFinder/", env!("CARGO_PKG_VERSION"));

// ─── Response shape ─────────────────────────────────────────────

#[derive(Deserialize, Debug, Default)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize, Debug, Default)]
struct Feature {
    #[serde(default)]
    properties: FeatureProperties,
    #[serde(default)]
    geometry: Geometry,
}

#[derive(Deserialize, Debug, Default)]
struct FeatureProperties {
    name: Option<String>,
    distance: Option<f64>,
    formatted: Option<String>,
    city: Option<String>,
    country: Option<String>,
    street: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct Geometry {
    #[serde(default)]
    coordinates: serde_json::Value,
}

impl Geometry {
    /// `[lon, lat]`, defaulting to the origin when absent or malformed.
    fn lon_lat(&self) -> (f64, f64) {
        let coord = |i: usize| {
            self.coordinates
                .get(i)
                .and_then(serde_json::Value::as_f64)
                .unwrap_or(0.0)
        };
        (coord(0), coord(1))
    }
}

impl From<Feature> for PlaceRecord {
    fn from(f: Feature) -> Self {
        let (lon, lat) = f.geometry.lon_lat();
        let p = f.properties;
        PlaceRecord {
            name: p.name.unwrap_or_else(|| UNNAMED_PLACE.to_string()),
            distance_m: p.distance,
            address: p.formatted,
            city: p.city,
            country: p.country,
            lat,
            lon,
            enrichment: None,
        }
    }
}

impl From<Feature> for PlaceSummary {
    fn from(f: Feature) -> Self {
        let p = f.properties;
        PlaceSummary {
            name: p.name,
            country: p.country,
            city: p.city,
            street: p.street,
            distance_m: p.distance,
            address: p.formatted,
        }
    }
}

// ─── Client ─────────────────────────────────────────────────────

pub struct PlaceSearchClient {
    endpoint: String,
    agent: ureq::Agent,
}

impl PlaceSearchClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build(),
        }
    }

    /// Search and translate features into full place records.
    pub fn search(&self, query: &SearchQuery, api_key: &str) -> Result<Vec<PlaceRecord>, SearchError> {
        Ok(self
            .fetch(query, api_key)?
            .into_iter()
            .map(PlaceRecord::from)
            .collect())
    }

    /// Search and translate features into the simplified summary shape.
    pub fn search_summaries(
        &self,
        query: &SearchQuery,
        api_key: &str,
    ) -> Result<Vec<PlaceSummary>, SearchError> {
        Ok(self
            .fetch(query, api_key)?
            .into_iter()
            .map(PlaceSummary::from)
            .collect())
    }

    fn fetch(&self, query: &SearchQuery, api_key: &str) -> Result<Vec<Feature>, SearchError> {
        let params = query_params(query);
        tracing::debug!(endpoint = %self.endpoint, %query, "places request");

        let mut request = self.agent.get(&self.endpoint);
        for (key, value) in &params {
            request = request.query(key, value);
        }
        let response = request.query("apiKey", api_key).call().map_err(|e| match e {
            ureq::Error::Status(status, _) => SearchError::Status { status },
            ureq::Error::Transport(t) => SearchError::Network(t.to_string()),
        })?;

        let body: FeatureCollection = response
            .into_json()
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        tracing::debug!(features = body.features.len(), "places response");
        Ok(body.features)
    }
}

/// Query parameters for a search, excluding the credential.
pub fn query_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("categories", query.category.clone()),
        (
            "filter",
            format!("circle:{},{},{}", query.lon, query.lat, query.radius_m),
        ),
    ];
    if query.bias {
        params.push(("bias", format!("proximity:{},{}", query.lon, query.lat)));
    }
    params.push(("limit", query.limit.to_string()));
    params
}
