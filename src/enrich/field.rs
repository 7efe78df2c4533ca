//! Typed outcome of one enrichment lookup.

use serde::{Serialize, Serializer};
use std::fmt;

/// Text shown in place of a value that could not be resolved.
pub const UNAVAILABLE: &str = "N/A";

/// Why a field has no value even though nothing went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    /// No land time zone covers the coordinates.
    NoTimeZone,
    /// The place record carries no country.
    NoCountry,
    /// The country text matched nothing in the reference data.
    NoCountryMatch,
    /// The country is known but has no currency entry.
    NoCurrency,
    /// The country is known but has no capital entry.
    NoCapital,
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTimeZone => write!(f, "no time zone at coordinates"),
            Self::NoCountry => write!(f, "no country on record"),
            Self::NoCountryMatch => write!(f, "country not recognised"),
            Self::NoCurrency => write!(f, "no currency for country"),
            Self::NoCapital => write!(f, "no capital for country"),
        }
    }
}

/// One enriched value: resolved, expectedly absent, or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Resolved(String),
    Unavailable(Unavailable),
    /// A lookup backend faulted; the message is for logs, not users.
    Failed(String),
}

impl Field {
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Resolved(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The value, or the `N/A` sentinel.
    pub fn as_display(&self) -> &str {
        self.value().unwrap_or(UNAVAILABLE)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_display())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_display())
    }
}
