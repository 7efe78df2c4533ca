//! GeoFinder: nearby places from the Geoapify places API, enriched with
//! local time, currency and capital city.

pub mod catalog;
pub mod config;
pub mod enrich;
pub mod export;
pub mod interactive;
pub mod place;
pub mod server;
