//! Enrichment engine: local time, currency and capital per place.
//!
//! The three lookups are independent. Each one degrades to its own
//! [`Field`] outcome, so a failing lookup never blocks the others.

use super::countries::{BuiltinCountries, CapitalDirectory, CountryMatcher, CurrencyDirectory};
use super::field::{Field, Unavailable};
use super::zone::{format_local_time, TzfLocator, ZoneLocator};
use super::LookupError;
use crate::catalog::CurrencyTable;
use crate::place::PlaceRecord;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// Fields added to a [`PlaceRecord`] by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enrichment {
    pub local_time: Field,
    pub currency: Field,
    pub capital: Field,
}

pub struct Enricher {
    currencies: CurrencyTable,
    zones: Box<dyn ZoneLocator>,
    matcher: Box<dyn CountryMatcher>,
    currency_names: Box<dyn CurrencyDirectory>,
    capitals: Box<dyn CapitalDirectory>,
}

impl Enricher {
    /// Engine with the given zone locator and built-in country data.
    pub fn new(currencies: CurrencyTable, zones: impl ZoneLocator + 'static) -> Self {
        Self {
            currencies,
            zones: Box::new(zones),
            matcher: Box::new(BuiltinCountries),
            currency_names: Box::new(BuiltinCountries),
            capitals: Box::new(BuiltinCountries),
        }
    }

    /// Engine backed entirely by offline reference data.
    pub fn offline(currencies: CurrencyTable) -> Self {
        Self::new(currencies, TzfLocator::new())
    }

    pub fn with_country_matcher(mut self, matcher: impl CountryMatcher + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    pub fn with_currency_directory(mut self, dir: impl CurrencyDirectory + 'static) -> Self {
        self.currency_names = Box::new(dir);
        self
    }

    pub fn with_capital_directory(mut self, dir: impl CapitalDirectory + 'static) -> Self {
        self.capitals = Box::new(dir);
        self
    }

    /// Enrich a record using the current time.
    pub fn enrich(&self, record: &mut PlaceRecord) {
        self.enrich_at(record, Utc::now());
    }

    /// Enrich a record, evaluating local time at `now`.
    pub fn enrich_at(&self, record: &mut PlaceRecord, now: DateTime<Utc>) {
        let country = record.country.as_deref();
        let enrichment = Enrichment {
            local_time: self.local_time(record.lon, record.lat, now),
            currency: self.currency(country),
            capital: self.capital(country),
        };
        for (label, field) in [
            ("local_time", &enrichment.local_time),
            ("currency", &enrichment.currency),
            ("capital", &enrichment.capital),
        ] {
            match field {
                Field::Failed(msg) => tracing::warn!(place = %record.name, field = label, "lookup failed: {}", msg),
                Field::Unavailable(why) => tracing::debug!(place = %record.name, field = label, "unavailable: {}", why),
                Field::Resolved(_) => {}
            }
        }
        record.enrichment = Some(enrichment);
    }

    /// Wall-clock time at the coordinates, as observed at `now`.
    pub fn local_time(&self, lon: f64, lat: f64, now: DateTime<Utc>) -> Field {
        match self.zones.zone_at(lon, lat) {
            Ok(Some(name)) => match name.parse::<Tz>() {
                Ok(tz) => Field::Resolved(format_local_time(now, tz)),
                Err(_) => Field::Failed(LookupError::UnknownZone(name).to_string()),
            },
            Ok(None) => Field::Unavailable(Unavailable::NoTimeZone),
            Err(e) => Field::Failed(e.to_string()),
        }
    }

    /// Currency from the lookup table, falling back to the fuzzy
    /// country match and the currency directory.
    pub fn currency(&self, country: Option<&str>) -> Field {
        let Some(country) = present(country) else {
            return Field::Unavailable(Unavailable::NoCountry);
        };
        if let Some(name) = self.currencies.get(country) {
            return Field::Resolved(name.to_string());
        }
        match self.matcher.match_country(country) {
            Ok(Some(id)) => match self.currency_names.currency_for(id.numeric) {
                Ok(Some(name)) => Field::Resolved(name),
                Ok(None) => Field::Unavailable(Unavailable::NoCurrency),
                Err(e) => Field::Failed(e.to_string()),
            },
            Ok(None) => Field::Unavailable(Unavailable::NoCountryMatch),
            Err(e) => Field::Failed(e.to_string()),
        }
    }

    pub fn capital(&self, country: Option<&str>) -> Field {
        let Some(country) = present(country) else {
            return Field::Unavailable(Unavailable::NoCountry);
        };
        match self.capitals.capital_of(country) {
            Ok(Some(capital)) => Field::Resolved(capital),
            Ok(None) => Field::Unavailable(Unavailable::NoCapital),
            Err(e) => Field::Failed(e.to_string()),
        }
    }
}

fn present(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::CountryId;
    use chrono::TimeZone;

    struct FixedZone(Option<&'static str>);

    impl ZoneLocator for FixedZone {
        fn zone_at(&self, _lon: f64, _lat: f64) -> Result<Option<String>, LookupError> {
            Ok(self.0.map(str::to_string))
        }
    }

    struct BrokenZone;

    impl ZoneLocator for BrokenZone {
        fn zone_at(&self, _lon: f64, _lat: f64) -> Result<Option<String>, LookupError> {
            Err(LookupError::Backend("boundary data missing".into()))
        }
    }

    struct BrokenCountries;

    impl CountryMatcher for BrokenCountries {
        fn match_country(&self, _text: &str) -> Result<Option<CountryId>, LookupError> {
            Err(LookupError::Backend("offline".into()))
        }
    }

    impl CapitalDirectory for BrokenCountries {
        fn capital_of(&self, _country: &str) -> Result<Option<String>, LookupError> {
            Err(LookupError::Backend("offline".into()))
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    fn record(country: Option<&str>) -> PlaceRecord {
        PlaceRecord {
            name: "Café Lisboa".into(),
            distance_m: Some(42.0),
            address: None,
            city: Some("Lisbon".into()),
            country: country.map(str::to_string),
            lat: 38.7071,
            lon: -9.1355,
            enrichment: None,
        }
    }

    fn table() -> CurrencyTable {
        [("PORTUGAL", "Euro (table)")].into_iter().collect()
    }

    #[test]
    fn test_enrich_all_fields() {
        let enricher = Enricher::new(table(), FixedZone(Some("Europe/Lisbon")));
        let mut r = record(Some("Portugal"));
        enricher.enrich_at(&mut r, noon());
        let e = r.enrichment.unwrap();
        // Lisbon is UTC+0 in January.
        assert_eq!(e.local_time, Field::Resolved("12:00 (12:00 PM)".into()));
        assert_eq!(e.currency, Field::Resolved("Euro (table)".into()));
        assert_eq!(e.capital, Field::Resolved("Lisbon".into()));
    }

    #[test]
    fn test_currency_table_case_insensitive() {
        let enricher = Enricher::new(table(), FixedZone(None));
        assert_eq!(enricher.currency(Some("portugal")), Field::Resolved("Euro (table)".into()));
    }

    #[test]
    fn test_currency_fuzzy_fallback() {
        let enricher = Enricher::new(CurrencyTable::default(), FixedZone(None));
        assert_eq!(enricher.currency(Some("Japan")), Field::Resolved("Yen".into()));
        assert_eq!(enricher.currency(Some("Germny")), Field::Resolved("Euro".into()));
    }

    #[test]
    fn test_currency_no_match() {
        let enricher = Enricher::new(table(), FixedZone(None));
        assert_eq!(
            enricher.currency(Some("Atlantis Prime")),
            Field::Unavailable(Unavailable::NoCountryMatch)
        );
    }

    #[test]
    fn test_missing_country() {
        let enricher = Enricher::new(table(), FixedZone(Some("Europe/Lisbon")));
        let mut r = record(None);
        enricher.enrich_at(&mut r, noon());
        let e = r.enrichment.unwrap();
        assert!(e.local_time.is_resolved());
        assert_eq!(e.currency, Field::Unavailable(Unavailable::NoCountry));
        assert_eq!(e.capital, Field::Unavailable(Unavailable::NoCountry));
        assert_eq!(enricher.currency(Some("  ")), Field::Unavailable(Unavailable::NoCountry));
    }

    #[test]
    fn test_no_zone_is_unavailable() {
        let enricher = Enricher::new(table(), FixedZone(None));
        assert_eq!(
            enricher.local_time(0.0, 0.0, noon()),
            Field::Unavailable(Unavailable::NoTimeZone)
        );
    }

    #[test]
    fn test_unknown_zone_name_fails() {
        let enricher = Enricher::new(table(), FixedZone(Some("Mars/Olympus")));
        let field = enricher.local_time(0.0, 0.0, noon());
        assert!(matches!(field, Field::Failed(ref m) if m.contains("Mars/Olympus")));
        assert_eq!(field.as_display(), "N/A");
    }

    #[test]
    fn test_failures_are_isolated() {
        let enricher = Enricher::new(CurrencyTable::default(), BrokenZone)
            .with_country_matcher(BrokenCountries)
            .with_capital_directory(BrokenCountries);
        let mut r = record(Some("Portugal"));
        enricher.enrich_at(&mut r, noon());
        let e = r.enrichment.unwrap();
        assert!(matches!(e.local_time, Field::Failed(_)));
        assert!(matches!(e.currency, Field::Failed(_)));
        assert!(matches!(e.capital, Field::Failed(_)));

        // The table still answers when the matcher is broken.
        let enricher = Enricher::new(table(), BrokenZone).with_country_matcher(BrokenCountries);
        let mut r = record(Some("Portugal"));
        enricher.enrich_at(&mut r, noon());
        let e = r.enrichment.unwrap();
        assert!(matches!(e.local_time, Field::Failed(_)));
        assert_eq!(e.currency, Field::Resolved("Euro (table)".into()));
        assert_eq!(e.capital, Field::Resolved("Lisbon".into()));
    }

    #[test]
    fn test_unknown_capital() {
        let enricher = Enricher::new(table(), FixedZone(None));
        assert_eq!(enricher.capital(Some("Narnia")), Field::Unavailable(Unavailable::NoCapital));
    }

    #[test]
    fn test_offline_engine_open_ocean() {
        let enricher = Enricher::offline(CurrencyTable::default());
        assert_eq!(
            enricher.local_time(0.0, 0.0, noon()),
            Field::Unavailable(Unavailable::NoTimeZone)
        );
    }
}
