//! iCalendar (RFC 5545) document generation.
//!
//! - [`core`]: value types and date / duration formatting
//! - [`build`]: content line folding and text escaping
//! - [`component`]: the renderable component tree
//! - [`resolver`]: `VTIMEZONE` lookup for calendars that embed zones

pub mod build;
pub mod component;
pub mod core;
pub mod resolver;

pub use component::{Calendar, Child, Component, Event, ProdId, Render, RenderItem, TimeZone};
pub use resolver::{FnResolver, SyncResolver, TimeZoneResolver, resolver_fn};
