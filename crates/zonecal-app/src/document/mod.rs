//! Calendar documents read by the `zonecal` binary.
//!
//! A document is a TOML file with an optional `[calendar]` table and a list
//! of `[[events]]`:
//!
//! ```toml
//! [calendar]
//! name = "Team"
//! timezone = "Europe/Berlin"
//!
//! [[events]]
//! summary = "Planning"
//! start = 2021-05-21T10:00:00Z
//! end = 2021-05-21T11:00:00Z
//! timezone = "Europe/Berlin"
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use config::{Config, File, FileFormat};
use serde::Deserialize;
use uuid::Uuid;
use zonecal_core::config::ProdIdConfig;
use zonecal_rfc::RfcError;
use zonecal_rfc::rfc::ical::core::{Description, Geo, Location, Organizer, Priority, ZonedDate};
use zonecal_rfc::rfc::ical::{Calendar, Event, ProdId};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarDocument {
    #[serde(default)]
    pub calendar: CalendarEntry,
    #[serde(default)]
    pub events: Vec<EventEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarEntry {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub method: Option<String>,
    /// Refresh interval in seconds.
    pub ttl: Option<u64>,
    pub timezone: Option<String>,
    #[serde(default)]
    pub x_attributes: Vec<AttributeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttributeEntry {
    pub key: String,
    pub value: String,
    #[serde(default = "default_escape")]
    pub escape: bool,
}

const fn default_escape() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventEntry {
    /// Generated when absent.
    pub uid: Option<String>,
    #[serde(default)]
    pub sequence: u32,
    pub summary: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    /// Zone the start and end are observed in; UTC when absent.
    pub timezone: Option<String>,
    /// Overrides `timezone` for the end only.
    pub end_timezone: Option<String>,
    /// Defaults to the load time.
    pub stamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub floating: bool,
    pub recurrence_id: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub html_description: Option<String>,
    pub location: Option<LocationEntry>,
    /// `Name <email>` or a bare email address.
    pub organizer: Option<String>,
    /// Display name only, rendered without a `mailto:` value.
    pub organizer_name: Option<String>,
    pub status: Option<String>,
    pub busy_status: Option<String>,
    pub transparency: Option<String>,
    pub priority: Option<u8>,
    pub url: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub x_attributes: Vec<AttributeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationEntry {
    pub title: String,
    pub address: Option<String>,
    pub radius: Option<f64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl CalendarDocument {
    /// ## Summary
    /// Reads a TOML calendar document from disk.
    ///
    /// ## Errors
    /// Returns `AppError::DocumentError` if the file is missing or malformed.
    pub fn load(path: &Path) -> AppResult<Self> {
        tracing::debug!(path = %path.display(), "Loading calendar document");

        let document = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?;

        Ok(document)
    }

    /// ## Summary
    /// Parses a TOML calendar document held in memory.
    ///
    /// ## Errors
    /// Returns `AppError::DocumentError` if the document is malformed.
    pub fn from_toml(source: &str) -> AppResult<Self> {
        let document = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?;

        Ok(document)
    }

    /// ## Summary
    /// Builds the calendar described by this document.
    ///
    /// `now` stamps events that carry no explicit `stamp`.
    ///
    /// ## Errors
    /// Returns an error if any value fails validation.
    pub fn into_calendar(self, prod_id: ProdId, now: DateTime<Utc>) -> AppResult<Calendar> {
        let Self {
            calendar: entry,
            events,
        } = self;

        let mut calendar = Calendar::new(prod_id);
        calendar.name = entry.name;
        calendar.description = entry.description;
        calendar.url = entry.url;
        calendar.method = entry.method.as_deref().map(str::parse).transpose()?;
        calendar.ttl = entry.ttl;
        calendar.timezone = entry.timezone;

        for attribute in &entry.x_attributes {
            calendar.add_custom_attribute(&attribute.key, &attribute.value, attribute.escape)?;
        }

        for event in events {
            calendar.add_event(event.into_event(now)?);
        }

        tracing::debug!(
            events = calendar.children.len(),
            "Calendar document converted"
        );

        Ok(calendar)
    }
}

impl EventEntry {
    /// ## Summary
    /// Builds an event, generating a UUID when no `uid` is given.
    ///
    /// ## Errors
    /// Returns an error if the end precedes the start or a value fails
    /// validation.
    pub fn into_event(self, now: DateTime<Utc>) -> AppResult<Event> {
        let uid = self
            .uid
            .filter(|uid| !uid.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        if let Some(end) = self.end
            && end < self.start
        {
            return Err(AppError::InvalidEvent {
                uid,
                reason: "end precedes start".to_string(),
            });
        }

        let zone = self.timezone.unwrap_or_default();
        let end_zone = self.end_timezone.unwrap_or_else(|| zone.clone());

        let mut event = Event::new(
            uid,
            self.summary,
            ZonedDate::new(self.start, zone),
            self.stamp.unwrap_or(now),
        );
        event.sequence = self.sequence;
        event.end = self.end.map(|end| ZonedDate::new(end, end_zone));
        event.all_day = self.all_day;
        event.floating = self.floating;
        event.recurrence_id = self.recurrence_id;
        event.description = match (self.description, self.html_description) {
            (Some(plain), Some(html)) => Some(Description::with_html(plain, html)),
            (Some(plain), None) => Some(plain.into()),
            (None, Some(html)) => Some(Description::with_html(String::new(), html)),
            (None, None) => None,
        };
        event.location = self.location.map(LocationEntry::into_location);
        event.organizer = match (self.organizer, self.organizer_name) {
            (Some(_), Some(_)) => {
                return Err(AppError::InvalidEvent {
                    uid: event.uid,
                    reason: "`organizer` and `organizer_name` are mutually exclusive".to_string(),
                });
            }
            (Some(organizer), None) => Some(organizer.parse()?),
            (None, Some(name)) if name.trim().is_empty() => {
                return Err(RfcError::EmptyOrganizerName.into());
            }
            (None, Some(name)) => Some(Organizer::Name(name)),
            (None, None) => None,
        };
        event.status = self.status.as_deref().map(str::parse).transpose()?;
        event.busy_status = self.busy_status.as_deref().map(str::parse).transpose()?;
        event.transparency = self.transparency.as_deref().map(str::parse).transpose()?;
        event.priority = self.priority.map(Priority::new).transpose()?;
        event.url = self.url;
        event.created = self.created;
        event.last_modified = self.last_modified;

        for attribute in self.x_attributes {
            event.add_x_attribute(attribute.key, attribute.value)?;
        }

        Ok(event)
    }
}

impl LocationEntry {
    fn into_location(self) -> Location {
        let geo = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Geo { lat, lon }),
            _ => None,
        };
        Location {
            title: self.title,
            address: self.address,
            radius: self.radius,
            geo,
        }
    }
}

/// Maps configured product identifier parts onto a `PRODID`.
#[must_use]
pub fn prod_id(config: &ProdIdConfig) -> ProdId {
    ProdId::new(&config.company, &config.product, &config.language)
}
