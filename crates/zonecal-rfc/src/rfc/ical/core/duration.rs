//! iCalendar DURATION value type (RFC 5545 §3.3.6).

use std::fmt;

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Duration value (RFC 5545 §3.3.6), split into day and time components.
///
/// Built from a signed number of seconds; week designators are never
/// produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duration {
    /// Whether this duration is negative.
    pub negative: bool,
    /// Number of days.
    pub days: u64,
    /// Number of hours.
    pub hours: u64,
    /// Number of minutes.
    pub minutes: u64,
    /// Number of seconds.
    pub seconds: u64,
}

impl Duration {
    /// Splits a signed number of seconds into duration components.
    #[must_use]
    pub const fn from_seconds(total: i64) -> Self {
        let negative = total < 0;
        let mut rest = total.unsigned_abs();

        let days = rest / SECONDS_PER_DAY;
        rest %= SECONDS_PER_DAY;
        let hours = rest / SECONDS_PER_HOUR;
        rest %= SECONDS_PER_HOUR;
        let minutes = rest / SECONDS_PER_MINUTE;
        let seconds = rest % SECONDS_PER_MINUTE;

        Self {
            negative,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    const fn has_time(&self) -> bool {
        self.hours > 0 || self.minutes > 0 || self.seconds > 0
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "P")?;

        if self.days > 0 {
            write!(f, "{}D", self.days)?;
            if !self.has_time() {
                return Ok(());
            }
        }

        write!(f, "T")?;
        if self.hours > 0 {
            write!(f, "{}H", self.hours)?;
        }
        if self.minutes > 0 {
            write!(f, "{}M", self.minutes)?;
        }
        if self.seconds > 0 {
            write!(f, "{}S", self.seconds)?;
        } else if !self.has_time() {
            // Never emit a bare `PT`
            write!(f, "0S")?;
        }
        Ok(())
    }
}

/// Formats a signed number of seconds as an iCalendar duration string.
#[must_use]
pub fn to_duration(seconds: i64) -> String {
    Duration::from_seconds(seconds).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_days_have_no_time_part() {
        assert_eq!(to_duration(86_400), "P1D");
        assert_eq!(to_duration(3 * 86_400), "P3D");
    }

    #[test]
    fn all_components() {
        assert_eq!(to_duration(90_061), "P1DT1H1M1S");
    }

    #[test]
    fn zero_duration() {
        assert_eq!(to_duration(0), "PT0S");
    }

    #[test]
    fn negative_duration() {
        assert_eq!(to_duration(-60), "-PT1M");
        assert_eq!(to_duration(-86_400), "-P1D");
    }

    #[test]
    fn time_only() {
        assert_eq!(to_duration(3_600), "PT1H");
        assert_eq!(to_duration(3_661), "PT1H1M1S");
        assert_eq!(to_duration(59), "PT59S");
        assert_eq!(to_duration(86_460), "P1DT1M");
    }

    #[test]
    fn components_are_split() {
        let duration = Duration::from_seconds(-90_061);
        assert!(duration.negative);
        assert_eq!(duration.days, 1);
        assert_eq!(duration.hours, 1);
        assert_eq!(duration.minutes, 1);
        assert_eq!(duration.seconds, 1);
    }
}
