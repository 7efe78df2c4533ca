//! Enrichment of place records with local time, currency and capital.
//!
//! Each lookup sits behind a small capability trait so the reference
//! data can be swapped; the built-in implementations work offline.

pub mod countries;
pub mod enricher;
pub mod field;
pub mod zone;

pub use countries::{BuiltinCountries, CapitalDirectory, CountryId, CountryMatcher, CurrencyDirectory};
pub use enricher::{Enricher, Enrichment};
pub use field::{Field, Unavailable, UNAVAILABLE};
pub use zone::{format_local_time, TzfLocator, ZoneLocator};

/// A reference lookup that faulted, as opposed to finding nothing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("invalid coordinates ({lon}, {lat})")]
    InvalidCoordinates { lon: f64, lat: f64 },

    #[error("unknown time zone '{0}'")]
    UnknownZone(String),

    #[error("reference lookup failed: {0}")]
    Backend(String),
}
