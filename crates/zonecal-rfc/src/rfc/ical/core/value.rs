//! Enumerated and range-checked property values.

use std::fmt;
use std::str::FromStr;

use crate::error::{RfcError, RfcResult};

/// Declares a closed set of iCalendar keywords with case-insensitive
/// parsing and uppercase rendering.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// All accepted values, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the keyword as written in iCalendar output.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = RfcError;

            fn from_str(s: &str) -> RfcResult<Self> {
                let upper = s.trim().to_ascii_uppercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str() == upper)
                    .ok_or_else(|| RfcError::InvalidValue {
                        kind: $kind,
                        value: s.to_string(),
                        allowed: Self::ALL
                            .iter()
                            .map(|value| value.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

keyword_enum! {
    /// Calendar-level `METHOD` (RFC 5546 §1.4).
    Method, "method" {
        Publish => "PUBLISH",
        Request => "REQUEST",
        Reply => "REPLY",
        Add => "ADD",
        Cancel => "CANCEL",
        Refresh => "REFRESH",
        Counter => "COUNTER",
        DeclineCounter => "DECLINECOUNTER",
    }
}

keyword_enum! {
    /// Event `STATUS` (RFC 5545 §3.8.1.11).
    EventStatus, "event status" {
        Confirmed => "CONFIRMED",
        Tentative => "TENTATIVE",
        Cancelled => "CANCELLED",
    }
}

keyword_enum! {
    /// Busy status hint for Microsoft clients (`X-MICROSOFT-CDO-BUSYSTATUS`).
    BusyStatus, "busy status" {
        Free => "FREE",
        Tentative => "TENTATIVE",
        Busy => "BUSY",
        /// Out of office.
        Oof => "OOF",
    }
}

keyword_enum! {
    /// Time transparency (`TRANSP`, RFC 5545 §3.8.2.7).
    Transparency, "transparency" {
        Transparent => "TRANSPARENT",
        Opaque => "OPAQUE",
    }
}

/// Event `PRIORITY` (RFC 5545 §3.8.1.9); 0 is undefined, 1 highest, 9 lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(u8);

impl Priority {
    pub const MAX: u8 = 9;

    /// ## Summary
    /// Creates a priority after checking its range.
    ///
    /// ## Errors
    /// Returns `RfcError::PriorityOutOfRange` for values above 9.
    pub fn new(value: u8) -> RfcResult<Self> {
        if value > Self::MAX {
            return Err(RfcError::PriorityOutOfRange(value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Priority {
    type Error = RfcError;

    fn try_from(value: u8) -> RfcResult<Self> {
        Self::new(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("confirmed".parse::<EventStatus>().unwrap(), EventStatus::Confirmed);
        assert_eq!(" Oof ".parse::<BusyStatus>().unwrap(), BusyStatus::Oof);
        assert_eq!("DeclineCounter".parse::<Method>().unwrap(), Method::DeclineCounter);
    }

    #[test]
    fn parse_rejects_unknown_value() {
        let err = "maybe".parse::<Transparency>().unwrap_err();
        match err {
            RfcError::InvalidValue {
                kind,
                value,
                allowed,
            } => {
                assert_eq!(kind, "transparency");
                assert_eq!(value, "maybe");
                assert_eq!(allowed, "TRANSPARENT, OPAQUE");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn display_is_uppercase_keyword() {
        assert_eq!(Method::Cancel.to_string(), "CANCEL");
        assert_eq!(EventStatus::Tentative.to_string(), "TENTATIVE");
    }

    #[test]
    fn priority_range() {
        assert_eq!(Priority::new(0).unwrap().value(), 0);
        assert_eq!(Priority::new(9).unwrap().to_string(), "9");
        assert!(matches!(
            Priority::try_from(10),
            Err(RfcError::PriorityOutOfRange(10))
        ));
    }
}
