//! iCalendar serialization primitives (RFC 5545).
//!
//! - Escape: Text value escaping
//! - Fold: Content line folding at 75 octets and CRLF joining

mod escape;
mod fold;

pub use escape::escape_text;
pub use fold::{fold_line, join_and_filter};
