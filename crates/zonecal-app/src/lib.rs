//! Command-line front end: turns a TOML calendar document into iCalendar text.

pub mod document;
pub mod error;
pub mod resolver;
