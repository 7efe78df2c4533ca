//! Place search: query validation, the API client and the
//! search-and-enrich facade.

pub mod client;
pub mod finder;
pub mod types;

pub use client::PlaceSearchClient;
pub use finder::GeoFinder;
pub use types::{
    PlaceRecord, PlaceSummary, QueryError, SearchError, SearchOutcome, SearchQuery, DEFAULT_LAT,
    DEFAULT_LIMIT, DEFAULT_LON, DEFAULT_RADIUS_M, MAX_LIMIT,
};
