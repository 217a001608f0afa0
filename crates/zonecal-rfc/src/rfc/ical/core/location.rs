//! Event location and description values.

/// Geographic position (RFC 5545 §3.8.1.6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geo {
    pub lat: f64,
    pub lon: f64,
}

/// Where an event takes place.
///
/// When both `radius` and `geo` are set, Apple clients additionally get an
/// `X-APPLE-STRUCTURED-LOCATION` property.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Location {
    pub title: String,
    pub address: Option<String>,
    /// Radius around `geo` in meters.
    pub radius: Option<f64>,
    pub geo: Option<Geo>,
}

impl Location {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl From<&str> for Location {
    fn from(title: &str) -> Self {
        Self::new(title)
    }
}

/// Event description with an optional HTML alternative (`X-ALT-DESC`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Description {
    pub plain: String,
    pub html: Option<String>,
}

impl Description {
    #[must_use]
    pub fn with_html(plain: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            plain: plain.into(),
            html: Some(html.into()),
        }
    }
}

impl From<&str> for Description {
    fn from(plain: &str) -> Self {
        Self {
            plain: plain.to_string(),
            html: None,
        }
    }
}

impl From<String> for Description {
    fn from(plain: String) -> Self {
        Self { plain, html: None }
    }
}
