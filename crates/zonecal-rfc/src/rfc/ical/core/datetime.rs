//! iCalendar DATE and DATE-TIME rendering (RFC 5545 §3.3.4, §3.3.5).

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use zonecal_core::constants::UTC_ZONE;

use crate::error::{RfcError, RfcResult};

const DATE_FORMAT: &str = "%Y%m%d";
const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// An absolute instant plus an optional IANA zone name.
///
/// A zoned date without a zone is interpreted as UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonedDate {
    instant: DateTime<Utc>,
    zone: Option<String>,
}

impl ZonedDate {
    /// Creates a zoned date observed in the named zone.
    #[must_use]
    pub fn new(instant: DateTime<Utc>, zone: impl Into<String>) -> Self {
        let zone = zone.into();
        Self {
            instant,
            zone: (!zone.is_empty()).then_some(zone),
        }
    }

    /// Creates a zoned date without an explicit zone.
    #[must_use]
    pub const fn utc(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            zone: None,
        }
    }

    #[must_use]
    pub const fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Returns the explicit zone name, if one was given.
    #[must_use]
    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    /// ## Summary
    /// Resolves the zone name to a `chrono_tz::Tz`, defaulting to UTC.
    ///
    /// ## Errors
    /// Returns `RfcError::UnknownTimezone` if the name is not an IANA zone.
    pub fn resolve_zone(&self) -> RfcResult<Tz> {
        match &self.zone {
            None => Ok(Tz::UTC),
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_e| RfcError::UnknownTimezone(name.clone())),
        }
    }
}

impl From<DateTime<Utc>> for ZonedDate {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::utc(instant)
    }
}

impl From<DateTime<Tz>> for ZonedDate {
    fn from(value: DateTime<Tz>) -> Self {
        Self::new(value.with_timezone(&Utc), value.timezone().name())
    }
}

fn format_fields<T>(value: &DateTime<T>, date_only: bool) -> String
where
    T: chrono::TimeZone,
    T::Offset: std::fmt::Display,
{
    value
        .format(if date_only { DATE_FORMAT } else { DATE_TIME_FORMAT })
        .to_string()
}

/// ## Summary
/// Formats the wall-clock fields of a zoned date as observed in its zone.
///
/// Produces `YYYYMMDD` when `date_only` is set, `YYYYMMDDTHHMMSS` otherwise.
///
/// ## Errors
/// Returns `RfcError::UnknownTimezone` if the zone cannot be resolved.
pub fn format_zoned(zoned: &ZonedDate, date_only: bool) -> RfcResult<String> {
    let tz = zoned.resolve_zone()?;
    Ok(format_fields(&zoned.instant.with_timezone(&tz), date_only))
}

/// Formats an instant's UTC fields followed by `Z`.
#[must_use]
pub fn format_utc(instant: &DateTime<Utc>, date_only: bool) -> String {
    let mut result = format_fields(instant, date_only);
    result.push('Z');
    result
}

/// ## Summary
/// Renders a complete date property line such as `DTSTART`.
///
/// - all-day: `NAME;VALUE=DATE:YYYYMMDD`
/// - floating: `NAME:YYYYMMDDTHHMMSS`
/// - UTC: `NAME:YYYYMMDDTHHMMSSZ`
/// - zoned: `NAME;TZID=<zone>:YYYYMMDDTHHMMSS`
///
/// ## Errors
/// Returns `RfcError::UnknownTimezone` if the zone cannot be resolved.
pub fn format_property(
    name: &str,
    zoned: &ZonedDate,
    floating: bool,
    all_day: bool,
) -> RfcResult<String> {
    if all_day {
        return Ok(format!("{name};VALUE=DATE:{}", format_zoned(zoned, true)?));
    }

    if floating {
        return Ok(format!("{name}:{}", format_zoned(zoned, false)?));
    }

    let tz = zoned.resolve_zone()?;
    let local = format_fields(&zoned.instant.with_timezone(&tz), false);

    if tz.name() == UTC_ZONE {
        Ok(format!("{name}:{local}Z"))
    } else {
        Ok(format!("{name};TZID={}:{local}", tz.name()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn instant() -> DateTime<Utc> {
        // 2021-05-08T05:02:01Z
        Utc.with_ymd_and_hms(2021, 5, 8, 5, 2, 1).unwrap()
    }

    #[test]
    fn zoned_date_without_zone_is_utc() {
        let zoned = ZonedDate::utc(instant());
        assert_eq!(zoned.zone(), None);
        assert_eq!(zoned.resolve_zone().unwrap(), Tz::UTC);
    }

    #[test]
    fn empty_zone_name_is_dropped() {
        let zoned = ZonedDate::new(instant(), "");
        assert_eq!(zoned.zone(), None);
    }

    #[test]
    fn zoned_date_from_chrono_tz() {
        let local = instant().with_timezone(&chrono_tz::Europe::Berlin);
        let zoned = ZonedDate::from(local);

        assert_eq!(zoned.zone(), Some("Europe/Berlin"));
        assert_eq!(zoned.instant(), instant());
    }

    #[test]
    fn format_zoned_in_utc() {
        let zoned = ZonedDate::new(instant(), "UTC");
        assert_eq!(format_zoned(&zoned, false).unwrap(), "20210508T050201");
        assert_eq!(format_zoned(&zoned, true).unwrap(), "20210508");
    }

    #[test]
    fn format_zoned_in_los_angeles() {
        let zoned = ZonedDate::new(instant(), "America/Los_Angeles");
        assert_eq!(format_zoned(&zoned, false).unwrap(), "20210507T220201");
        assert_eq!(format_zoned(&zoned, true).unwrap(), "20210507");
    }

    #[test]
    fn format_zoned_unknown_zone() {
        let zoned = ZonedDate::new(instant(), "Mars/Olympus_Mons");
        let err = format_zoned(&zoned, false).unwrap_err();
        assert!(matches!(err, RfcError::UnknownTimezone(ref tz) if tz == "Mars/Olympus_Mons"));
    }

    #[test]
    fn format_utc_appends_z() {
        assert_eq!(format_utc(&instant(), false), "20210508T050201Z");
        assert_eq!(format_utc(&instant(), true), "20210508Z");
    }

    #[test]
    fn property_utc_input() {
        let zoned = ZonedDate::new(instant(), "UTC");

        assert_eq!(
            format_property("DTSTART", &zoned, true, false).unwrap(),
            "DTSTART:20210508T050201"
        );
        assert_eq!(
            format_property("DTEND", &zoned, true, true).unwrap(),
            "DTEND;VALUE=DATE:20210508"
        );
        assert_eq!(
            format_property("DTSTART", &zoned, false, false).unwrap(),
            "DTSTART:20210508T050201Z"
        );
        assert_eq!(
            format_property("DTSTART", &zoned, false, true).unwrap(),
            "DTSTART;VALUE=DATE:20210508"
        );
    }

    #[test]
    fn property_zoned_input() {
        let zoned = ZonedDate::new(instant(), "America/Los_Angeles");

        assert_eq!(
            format_property("DTSTART", &zoned, true, false).unwrap(),
            "DTSTART:20210507T220201"
        );
        assert_eq!(
            format_property("DTEND", &zoned, true, true).unwrap(),
            "DTEND;VALUE=DATE:20210507"
        );
        assert_eq!(
            format_property("DTSTART", &zoned, false, false).unwrap(),
            "DTSTART;TZID=America/Los_Angeles:20210507T220201"
        );
        assert_eq!(
            format_property("DTSTART", &zoned, false, true).unwrap(),
            "DTSTART;VALUE=DATE:20210507"
        );
    }

    #[test]
    fn property_without_zone_takes_utc_branch() {
        let zoned = ZonedDate::utc(instant());
        assert_eq!(
            format_property("DTSTART", &zoned, false, false).unwrap(),
            "DTSTART:20210508T050201Z"
        );
    }
}
