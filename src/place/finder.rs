//! Search-and-enrich facade.
//!
//! Built once at start-up from [`AppConfig`] and then only read, so one
//! instance can serve many independent queries.

use super::client::PlaceSearchClient;
use super::types::{PlaceSummary, SearchError, SearchOutcome, SearchQuery};
use crate::catalog::{CategoryCatalog, CurrencyTable};
use crate::config::AppConfig;
use crate::enrich::Enricher;
use chrono::{DateTime, Utc};
use std::time::Instant;

pub struct GeoFinder {
    client: PlaceSearchClient,
    enricher: Enricher,
    catalog: CategoryCatalog,
    api_key: Option<String>,
}

impl GeoFinder {
    pub fn new(
        client: PlaceSearchClient,
        enricher: Enricher,
        catalog: CategoryCatalog,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            enricher,
            catalog,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Load reference data and build the search pipeline.
    pub fn from_config(config: &AppConfig) -> Self {
        let catalog = CategoryCatalog::load(&config.categories_path);
        let currencies = CurrencyTable::load(&config.currencies_path);
        Self::new(
            PlaceSearchClient::new(config.api_url.clone()),
            Enricher::offline(currencies),
            catalog,
            config.api_key.clone(),
        )
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn credential(&self) -> Result<&str, SearchError> {
        self.api_key.as_deref().ok_or(SearchError::MissingCredential)
    }

    /// Search and enrich every result, with local times taken now.
    pub fn search(&self, query: &SearchQuery) -> SearchOutcome {
        self.search_at(query, Utc::now())
    }

    pub fn search_at(&self, query: &SearchQuery, now: DateTime<Utc>) -> SearchOutcome {
        let start = Instant::now();
        let result = self
            .credential()
            .and_then(|key| self.client.search(query, key))
            .map(|mut records| {
                for record in &mut records {
                    self.enricher.enrich_at(record, now);
                }
                records
            });
        let outcome = SearchOutcome::from_result(result);
        log_outcome(query, &outcome, start);
        outcome
    }

    /// Search without enrichment, in the simplified summary shape.
    pub fn search_summaries(&self, query: &SearchQuery) -> SearchOutcome<PlaceSummary> {
        let start = Instant::now();
        let result = self
            .credential()
            .and_then(|key| self.client.search_summaries(query, key));
        let outcome = SearchOutcome::from_result(result);
        log_outcome(query, &outcome, start);
        outcome
    }
}

fn log_outcome<T>(query: &SearchQuery, outcome: &SearchOutcome<T>, start: Instant) {
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    match outcome {
        SearchOutcome::Found(items) => {
            tracing::info!(%query, results = items.len(), elapsed_ms, "search complete")
        }
        SearchOutcome::Empty => tracing::info!(%query, elapsed_ms, "search returned no places"),
        SearchOutcome::Failed(e) => tracing::warn!(%query, error = %e, elapsed_ms, "search failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::{LookupError, ZoneLocator};

    struct NoZone;

    impl ZoneLocator for NoZone {
        fn zone_at(&self, _lon: f64, _lat: f64) -> Result<Option<String>, LookupError> {
            Ok(None)
        }
    }

    fn finder(api_key: Option<&str>) -> GeoFinder {
        GeoFinder::new(
            // Nothing listens here; a missing key must fail before any request.
            PlaceSearchClient::new("http://127.0.0.1:9/v2/places"),
            Enricher::new(CurrencyTable::default(), NoZone),
            CategoryCatalog::parse("catering.cafe\n"),
            api_key.map(str::to_string),
        )
    }

    #[test]
    fn test_missing_credential_is_config_failure() {
        let f = finder(None);
        assert!(!f.has_credential());
        let q = SearchQuery::new(38.7071, -9.1355, 1000.0, "catering", 5).unwrap();
        match f.search(&q) {
            SearchOutcome::Failed(e) => assert!(e.is_config()),
            other => panic!("expected config failure, got {:?}", other),
        }
        assert!(matches!(
            f.search_summaries(&q),
            SearchOutcome::Failed(SearchError::MissingCredential)
        ));
        // Reference data is unaffected.
        assert_eq!(f.catalog().children("catering"), &["catering.cafe"]);
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        assert!(!finder(Some("   ")).has_credential());
        assert!(finder(Some("key")).has_credential());
    }

    #[test]
    fn test_unreachable_api_is_network_failure() {
        let f = finder(Some("key"));
        let q = SearchQuery::new(0.0, 0.0, 10.0, "catering", 1).unwrap();
        assert!(matches!(f.search(&q), SearchOutcome::Failed(SearchError::Network(_))));
    }
}
