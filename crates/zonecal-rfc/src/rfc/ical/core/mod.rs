//! iCalendar value types (RFC 5545).
//!
//! Plain data carried by components, plus the date and duration formatting
//! rules used when rendering them.

mod datetime;
mod duration;
mod location;
mod organizer;
mod value;

pub use datetime::{ZonedDate, format_property, format_utc, format_zoned};
pub use duration::{Duration, to_duration};
pub use location::{Description, Geo, Location};
pub use organizer::Organizer;
pub use value::{BusyStatus, EventStatus, Method, Priority, Transparency};
