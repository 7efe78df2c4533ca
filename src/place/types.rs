//! Core types for place search.

use crate::enrich::Enrichment;
use serde::Serialize;
use std::fmt;

/// Name given to places the API returns without one.
pub const UNNAMED_PLACE: &str = "Unnamed";

/// Default search centre (Lisbon), shared by the CLI and HTTP front-ends.
pub const DEFAULT_LAT: f64 = 38.7071;
pub const DEFAULT_LON: f64 = -9.1355;
pub const DEFAULT_RADIUS_M: f64 = 1000.0;
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest result count the front-ends accept.
pub const MAX_LIMIT: u32 = 50;

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    pub lat: f64,
    pub lon: f64,
    pub radius_m: f64,
    /// Category identifier, either a parent (`catering`) or a full
    /// dotted path (`catering.cafe`).
    pub category: String,
    pub limit: u32,
    /// Bias results toward the query centre.
    pub bias: bool,
}

impl SearchQuery {
    pub fn new(
        lat: f64,
        lon: f64,
        radius_m: f64,
        category: impl Into<String>,
        limit: u32,
    ) -> Result<Self, QueryError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(QueryError::Latitude(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(QueryError::Longitude(lon));
        }
        if !radius_m.is_finite() || radius_m < 0.0 {
            return Err(QueryError::Radius(radius_m));
        }
        if limit == 0 {
            return Err(QueryError::Limit);
        }
        let category = category.into().trim().to_string();
        if category.is_empty() {
            return Err(QueryError::Category);
        }
        Ok(Self {
            lat,
            lon,
            radius_m,
            category,
            limit,
            bias: true,
        })
    }

    /// Drop the proximity bias parameter from the request.
    pub fn without_bias(mut self) -> Self {
        self.bias = false;
        self
    }
}

/// One search result. Enrichment is attached once, after the search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceRecord {
    pub name: String,
    pub distance_m: Option<f64>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(flatten)]
    pub enrichment: Option<Enrichment>,
}

/// The simplified result shape printed by the interactive prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaceSummary {
    pub name: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub distance_m: Option<f64>,
    pub address: Option<String>,
}

impl PlaceSummary {
    /// Labelled fields that are present, in display order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        let text = [
            ("Name", &self.name),
            ("Country", &self.country),
            ("City", &self.city),
            ("Street", &self.street),
        ];
        for (label, value) in text {
            if let Some(v) = value {
                out.push((label, v.clone()));
            }
        }
        if let Some(d) = self.distance_m {
            out.push(("Distance (m)", d.to_string()));
        }
        if let Some(a) = &self.address {
            out.push(("Address", a.clone()));
        }
        out
    }
}

/// Result of a search, keeping "no matches" apart from "could not ask".
#[derive(Debug)]
pub enum SearchOutcome<T = PlaceRecord> {
    Found(Vec<T>),
    Empty,
    Failed(SearchError),
}

impl<T> SearchOutcome<T> {
    pub fn from_result(result: Result<Vec<T>, SearchError>) -> Self {
        match result {
            Ok(items) if items.is_empty() => Self::Empty,
            Ok(items) => Self::Found(items),
            Err(e) => Self::Failed(e),
        }
    }

    /// The found items, empty for `Empty` and `Failed`.
    pub fn items(&self) -> &[T] {
        match self {
            Self::Found(items) => items,
            _ => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Rejected search parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    #[error("latitude {0} outside -90..90")]
    Latitude(f64),
    #[error("longitude {0} outside -180..180")]
    Longitude(f64),
    #[error("radius {0} must be a non-negative number of metres")]
    Radius(f64),
    #[error("result limit must be at least 1")]
    Limit,
    #[error("category must not be empty")]
    Category,
}

/// Why a search produced no answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("API key not configured (set GEOAPIFY_KEY)")]
    MissingCredential,
    #[error("network error: {0}")]
    Network(String),
    #[error("places API answered HTTP {status}")]
    Status { status: u16 },
    #[error("invalid API response: {0}")]
    InvalidResponse(String),
}

impl SearchError {
    /// Configuration problems are the user's to fix, not transient.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::MissingCredential)
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} within {}m of ({:.4}, {:.4}), limit {}",
            self.category, self.radius_m, self.lat, self.lon, self.limit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_valid() {
        let q = SearchQuery::new(38.7071, -9.1355, 1000.0, " catering ", 5).unwrap();
        assert_eq!(q.category, "catering");
        assert!(q.bias);
        assert!(!q.without_bias().bias);
    }

    #[test]
    fn test_query_bounds_inclusive() {
        assert!(SearchQuery::new(90.0, 180.0, 0.0, "activity", 1).is_ok());
        assert!(SearchQuery::new(-90.0, -180.0, 0.0, "activity", 1).is_ok());
    }

    #[test]
    fn test_query_rejects() {
        assert_eq!(
            SearchQuery::new(90.5, 0.0, 10.0, "a", 1),
            Err(QueryError::Latitude(90.5))
        );
        assert_eq!(
            SearchQuery::new(0.0, -181.0, 10.0, "a", 1),
            Err(QueryError::Longitude(-181.0))
        );
        assert!(matches!(
            SearchQuery::new(0.0, 0.0, -1.0, "a", 1),
            Err(QueryError::Radius(_))
        ));
        assert!(matches!(
            SearchQuery::new(0.0, 0.0, f64::INFINITY, "a", 1),
            Err(QueryError::Radius(_))
        ));
        assert!(SearchQuery::new(f64::NAN, 0.0, 1.0, "a", 1).is_err());
        assert_eq!(SearchQuery::new(0.0, 0.0, 1.0, "a", 0), Err(QueryError::Limit));
        assert_eq!(SearchQuery::new(0.0, 0.0, 1.0, "  ", 3), Err(QueryError::Category));
    }

    #[test]
    fn test_outcome_keeps_empty_apart_from_failure() {
        let empty: SearchOutcome<u8> = SearchOutcome::from_result(Ok(vec![]));
        assert!(matches!(empty, SearchOutcome::Empty));
        assert!(!empty.is_failed());

        let failed: SearchOutcome<u8> =
            SearchOutcome::from_result(Err(SearchError::Network("refused".into())));
        assert!(failed.is_failed());
        assert!(failed.items().is_empty());

        let found = SearchOutcome::from_result(Ok(vec![1u8, 2]));
        assert_eq!(found.items(), &[1, 2]);
    }

    #[test]
    fn test_summary_fields_only_present() {
        let s = PlaceSummary {
            name: Some("Café A".into()),
            city: Some("Lisbon".into()),
            distance_m: Some(120.0),
            ..Default::default()
        };
        assert_eq!(
            s.fields(),
            vec![
                ("Name", "Café A".to_string()),
                ("City", "Lisbon".to_string()),
                ("Distance (m)", "120".to_string()),
            ]
        );
    }
}
