/// Line break required between iCalendar content lines
pub const CRLF: &str = "\r\n";

/// Maximum octets per physical line, continuation space included
pub const FOLD_WIDTH: usize = 75;

/// Zone name that never needs a VTIMEZONE block
pub const UTC_ZONE: &str = "UTC";

pub const ICALENDAR_VERSION: &str = "2.0";
pub const DEFAULT_CALSCALE: &str = "GREGORIAN";

/// Product identifier fallbacks used when a calendar is built without one
pub const DEFAULT_PRODID_COMPANY: &str = "Unnamed";
pub const DEFAULT_PRODID_PRODUCT: &str = "Unnamed";
pub const DEFAULT_PRODID_LANGUAGE: &str = "EN";

pub const DEFAULT_PRODID: &str = const_str::concat!(
    "-//",
    DEFAULT_PRODID_COMPANY,
    "//",
    DEFAULT_PRODID_PRODUCT,
    "//",
    DEFAULT_PRODID_LANGUAGE
);

/// Prefix that every custom (non-standard) property name must carry
pub const EXTENSION_PREFIX: &str = "X-";
