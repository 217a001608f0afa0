//! iCalendar (RFC 5545) generation.
//!
//! Builds a tree of calendar components in memory and renders it to folded,
//! CRLF-delimited text. See [`rfc::ical`] for the component model.

pub mod error;
pub mod rfc;

pub use error::{RfcError, RfcResult};
