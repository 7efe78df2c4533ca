//! Time zone lookup from coordinates and local wall-clock formatting.

use super::LookupError;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tzf_rs::DefaultFinder;

/// Wall-clock format: 24-hour time followed by the 12-hour equivalent.
pub const LOCAL_TIME_FORMAT: &str = "%H:%M (%I:%M %p)";

/// Resolves the IANA time zone covering a point.
pub trait ZoneLocator: Send + Sync {
    /// `Ok(None)` when no land zone covers the point.
    fn zone_at(&self, lon: f64, lat: f64) -> Result<Option<String>, LookupError>;
}

/// Offline zone lookup backed by the `tzf-rs` boundary data.
pub struct TzfLocator {
    finder: DefaultFinder,
}

impl TzfLocator {
    pub fn new() -> Self {
        Self {
            finder: DefaultFinder::new(),
        }
    }
}

impl Default for TzfLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneLocator for TzfLocator {
    fn zone_at(&self, lon: f64, lat: f64) -> Result<Option<String>, LookupError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(LookupError::InvalidCoordinates { lon, lat });
        }
        let name = self.finder.get_tz_name(lon, lat);
        Ok(land_zone(name).map(str::to_string))
    }
}

/// Filter out empty answers and the nautical `Etc/*` zones used for
/// open water.
pub fn land_zone(name: &str) -> Option<&str> {
    let name = name.trim();
    if name.is_empty() || name.starts_with("Etc/") {
        None
    } else {
        Some(name)
    }
}

/// Format `now` as the wall-clock time observed in `tz`.
pub fn format_local_time(now: DateTime<Utc>, tz: Tz) -> String {
    now.with_timezone(&tz).format(LOCAL_TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Checks `HH:MM (hh:MM AM|PM)` with HH in 00..=23 and hh in 01..=12.
    fn matches_local_time_shape(s: &str) -> bool {
        let b = s.as_bytes();
        if b.len() != 16 || b[2] != b':' || &b[5..7] != b" (" || b[9] != b':' || b[12] != b' ' || b[15] != b')' {
            return false;
        }
        let num = |r: std::ops::Range<usize>| s[r].parse::<u32>().ok();
        let (Some(h24), Some(m24), Some(h12), Some(m12)) = (num(0..2), num(3..5), num(7..9), num(10..12)) else {
            return false;
        };
        let suffix = &s[13..15];
        h24 <= 23
            && m24 <= 59
            && (1..=12).contains(&h12)
            && m12 == m24
            && (suffix == "AM" || suffix == "PM")
            && (suffix == "PM") == (h24 >= 12)
    }

    #[test]
    fn test_format_afternoon() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 14, 32, 0).unwrap();
        assert_eq!(format_local_time(now, chrono_tz::UTC), "14:32 (02:32 PM)");
    }

    #[test]
    fn test_format_applies_offset() {
        // Tokyo is UTC+9 with no DST.
        let now = Utc.with_ymd_and_hms(2026, 7, 1, 3, 5, 0).unwrap();
        assert_eq!(format_local_time(now, chrono_tz::Asia::Tokyo), "12:05 (12:05 PM)");
    }

    #[test]
    fn test_format_midnight() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 7, 0).unwrap();
        assert_eq!(format_local_time(now, chrono_tz::UTC), "00:07 (12:07 AM)");
    }

    #[test]
    fn test_format_shape_every_hour() {
        for hour in 0..24 {
            for zone in [chrono_tz::UTC, chrono_tz::Asia::Kolkata, chrono_tz::America::St_Johns] {
                let now = Utc.with_ymd_and_hms(2026, 6, 10, hour, 41, 0).unwrap();
                let s = format_local_time(now, zone);
                assert!(matches_local_time_shape(&s), "bad shape: {}", s);
            }
        }
    }

    #[test]
    fn test_land_zone_filter() {
        assert_eq!(land_zone("Europe/Lisbon"), Some("Europe/Lisbon"));
        assert_eq!(land_zone(""), None);
        assert_eq!(land_zone("Etc/GMT"), None);
        assert_eq!(land_zone("Etc/GMT-3"), None);
    }

    #[test]
    fn test_tzf_lisbon() {
        let locator = TzfLocator::new();
        let zone = locator.zone_at(-9.1355, 38.7071).unwrap();
        assert_eq!(zone.as_deref(), Some("Europe/Lisbon"));
    }

    #[test]
    fn test_tzf_open_ocean_has_no_zone() {
        let locator = TzfLocator::new();
        assert_eq!(locator.zone_at(0.0, 0.0).unwrap(), None);
    }

    #[test]
    fn test_tzf_rejects_out_of_range() {
        let locator = TzfLocator::new();
        assert!(matches!(
            locator.zone_at(200.0, 10.0),
            Err(LookupError::InvalidCoordinates { .. })
        ));
        assert!(locator.zone_at(f64::NAN, 10.0).is_err());
    }
}
