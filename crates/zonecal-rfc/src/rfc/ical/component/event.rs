//! `VEVENT` component (RFC 5545 §3.6.1).

use chrono::{DateTime, Utc};
use zonecal_core::constants::EXTENSION_PREFIX;

use super::{Child, Render, RenderItem, push_zone};
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::build::escape_text;
use crate::rfc::ical::core::{
    BusyStatus, Description, EventStatus, Location, Organizer, Priority, Transparency, ZonedDate,
    format_property, format_utc,
};

/// A calendar event.
///
/// Plain data: assign fields directly. Values with a restricted domain
/// (`priority`, the status keywords, organizer strings) are validated when
/// their typed value is constructed.
#[derive(Debug, Clone)]
pub struct Event {
    pub uid: String,
    /// Revision counter, bumped on every significant change.
    pub sequence: u32,
    pub start: ZonedDate,
    pub end: Option<ZonedDate>,
    /// Creation or last update of this event's iCalendar representation.
    pub stamp: DateTime<Utc>,
    pub all_day: bool,
    /// Render start and end as local wall-clock time without zone marker.
    pub floating: bool,
    pub recurrence_id: Option<DateTime<Utc>>,
    pub summary: String,
    pub description: Option<Description>,
    pub location: Option<Location>,
    pub organizer: Option<Organizer>,
    pub status: Option<EventStatus>,
    pub busy_status: Option<BusyStatus>,
    pub transparency: Option<Transparency>,
    pub priority: Option<Priority>,
    pub url: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    pub children: Vec<Child>,
    x_attributes: Vec<(String, String)>,
}

impl Event {
    #[must_use]
    pub fn new(
        uid: impl Into<String>,
        summary: impl Into<String>,
        start: impl Into<ZonedDate>,
        stamp: DateTime<Utc>,
    ) -> Self {
        Self {
            uid: uid.into(),
            sequence: 0,
            start: start.into(),
            end: None,
            stamp,
            all_day: false,
            floating: false,
            recurrence_id: None,
            summary: summary.into(),
            description: None,
            location: None,
            organizer: None,
            status: None,
            busy_status: None,
            transparency: None,
            priority: None,
            url: None,
            created: None,
            last_modified: None,
            children: Vec::new(),
            x_attributes: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: impl Into<Child>) -> &mut Self {
        self.children.push(child.into());
        self
    }

    /// ## Summary
    /// Adds a custom `X-` property, rendered after the standard properties.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidCustomAttribute` if `key` lacks the `X-` prefix.
    pub fn add_x_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> RfcResult<&mut Self> {
        let key = key.into();
        if !key.starts_with(EXTENSION_PREFIX) {
            return Err(RfcError::InvalidCustomAttribute(key));
        }
        self.x_attributes.push((key, value.into()));
        Ok(self)
    }

    #[must_use]
    pub fn x_attributes(&self) -> &[(String, String)] {
        &self.x_attributes
    }

    fn timing_lines(&self) -> RfcResult<Vec<String>> {
        let mut lines = vec![
            format!("UID:{}", self.uid),
            format!("SEQUENCE:{}", self.sequence),
            format!("DTSTAMP:{}", format_utc(&self.stamp, false)),
            format_property("DTSTART", &self.start, self.floating, self.all_day)?,
        ];

        if let Some(end) = &self.end {
            lines.push(format_property("DTEND", end, self.floating, self.all_day)?);
        }

        if self.all_day {
            lines.push("X-MICROSOFT-CDO-ALLDAYEVENT:TRUE".to_string());
            lines.push("X-MICROSOFT-MSNCALENDAR-ALLDAYEVENT:TRUE".to_string());
        }

        if let Some(recurrence_id) = &self.recurrence_id {
            lines.push(format!("RECURRENCE-ID:{}", format_utc(recurrence_id, false)));
        }

        Ok(lines)
    }

    fn detail_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("SUMMARY:{}", escape_text(&self.summary))];

        if let Some(transparency) = self.transparency {
            lines.push(format!("TRANSP:{transparency}"));
        }

        if let Some(location) = &self.location {
            lines.extend(location_lines(location));
        }

        if let Some(description) = &self.description {
            lines.push(format!("DESCRIPTION:{}", escape_text(&description.plain)));
            if let Some(html) = &description.html {
                lines.push(format!(
                    "X-ALT-DESC;FMTTYPE=text/html:{}",
                    escape_text(html)
                ));
            }
        }

        if let Some(organizer) = &self.organizer {
            lines.push(organizer_line(organizer));
        }

        if let Some(url) = &self.url {
            lines.push(format!("URL;VALUE=URI:{}", escape_text(url)));
        }

        if let Some(status) = self.status {
            lines.push(format!("STATUS:{status}"));
        }

        if let Some(busy_status) = self.busy_status {
            lines.push(format!("X-MICROSOFT-CDO-BUSYSTATUS:{busy_status}"));
        }

        if let Some(priority) = self.priority {
            lines.push(format!("PRIORITY:{priority}"));
        }

        if let Some(created) = &self.created {
            lines.push(format!("CREATED:{}", format_utc(created, false)));
        }

        if let Some(last_modified) = &self.last_modified {
            lines.push(format!("LAST-MODIFIED:{}", format_utc(last_modified, false)));
        }

        for (key, value) in &self.x_attributes {
            lines.push(format!("{key}:{}", escape_text(value)));
        }

        lines
    }
}

fn location_lines(location: &Location) -> Vec<String> {
    let Location {
        title,
        address,
        radius,
        geo,
    } = location;

    if title.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::with_capacity(3);

    match (radius, geo) {
        (Some(radius), Some(geo)) => {
            let full = match address {
                Some(address) => format!("{title}\n{address}"),
                None => title.clone(),
            };
            lines.push(format!("LOCATION:{}", escape_text(&full)));

            let address_param = address
                .as_ref()
                .map(|address| format!("X-ADDRESS={};", escape_text(address)))
                .unwrap_or_default();
            lines.push(format!(
                "X-APPLE-STRUCTURED-LOCATION;VALUE=URI;{address_param}X-APPLE-RADIUS={radius};X-TITLE={}:geo:{},{}",
                escape_text(title),
                geo.lat,
                geo.lon
            ));
        }
        _ => lines.push(format!("LOCATION:{}", escape_text(title))),
    }

    if let Some(geo) = geo {
        lines.push(format!("GEO:{};{}", geo.lat, geo.lon));
    }

    lines
}

fn organizer_line(organizer: &Organizer) -> String {
    match organizer {
        Organizer::Name(name) => format!("ORGANIZER;CN=\"{}\"", escape_text(name)),
        Organizer::Contact {
            name,
            email,
            mailto,
        } => {
            let mut line = format!("ORGANIZER;CN=\"{}\"", escape_text(name));
            if let (Some(email), Some(_)) = (email, mailto) {
                line.push_str(";EMAIL=");
                line.push_str(&escape_text(email));
            }
            if let Some(email) = email {
                line.push_str(":mailto:");
                line.push_str(&escape_text(mailto.as_deref().unwrap_or(email)));
            }
            line
        }
    }
}

impl Render for Event {
    fn tag_name(&self) -> &'static str {
        "VEVENT"
    }

    fn children(&self) -> &[Child] {
        &self.children
    }

    /// Start zone, then end zone when it differs.
    fn time_zones(&self) -> Vec<String> {
        let mut zones = Vec::with_capacity(2);
        if let Some(zone) = self.start.zone() {
            push_zone(&mut zones, zone);
        }
        if let Some(zone) = self.end.as_ref().and_then(ZonedDate::zone) {
            push_zone(&mut zones, zone);
        }
        zones
    }

    fn emit_lines<'a>(&'a self, gathered: Vec<RenderItem<'a>>) -> RfcResult<Vec<RenderItem<'a>>> {
        if self.uid.is_empty() {
            return Err(RfcError::ValidationError("event UID is required".to_string()));
        }

        let mut items: Vec<RenderItem<'a>> = self
            .timing_lines()?
            .into_iter()
            .chain(self.detail_lines())
            .map(RenderItem::from)
            .collect();
        items.extend(gathered);
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::rfc::ical::core::Geo;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn event() -> Event {
        Event::new(
            "testuid",
            "Test",
            ZonedDate::new(at(2021, 5, 21, 10, 0, 6), "America/Los_Angeles"),
            at(2021, 5, 15, 0, 0, 0),
        )
    }

    fn lines(event: &Event) -> Vec<String> {
        let mut lines = event.timing_lines().unwrap();
        lines.extend(event.detail_lines());
        lines
    }

    fn count(lines: &[String], prefix: &str) -> usize {
        lines.iter().filter(|line| line.starts_with(prefix)).count()
    }

    #[test]
    fn timing_lines_in_zone() {
        let mut event = event();
        event.end = Some(ZonedDate::new(at(2021, 5, 21, 11, 30, 58), "America/Los_Angeles"));
        event.sequence = 1;

        let lines = event.timing_lines().unwrap();
        assert_eq!(
            lines,
            vec![
                "UID:testuid",
                "SEQUENCE:1",
                "DTSTAMP:20210515T000000Z",
                "DTSTART;TZID=America/Los_Angeles:20210521T030006",
                "DTEND;TZID=America/Los_Angeles:20210521T043058",
            ]
        );
    }

    #[test]
    fn all_day_lines() {
        let mut event = Event::new(
            "testuid",
            "Test",
            at(2021, 5, 21, 0, 0, 0),
            at(2021, 5, 15, 0, 0, 0),
        );
        event.end = Some(at(2021, 5, 22, 0, 0, 0).into());
        event.all_day = true;

        let lines = event.timing_lines().unwrap();
        assert!(lines.contains(&"DTSTART;VALUE=DATE:20210521".to_string()));
        assert!(lines.contains(&"DTEND;VALUE=DATE:20210522".to_string()));
        assert!(lines.contains(&"X-MICROSOFT-CDO-ALLDAYEVENT:TRUE".to_string()));
        assert!(lines.contains(&"X-MICROSOFT-MSNCALENDAR-ALLDAYEVENT:TRUE".to_string()));
    }

    #[test]
    fn floating_lines_have_no_zone_marker() {
        let mut event = event();
        event.floating = true;

        let lines = event.timing_lines().unwrap();
        assert_eq!(lines[3], "DTSTART:20210521T030006");
    }

    #[test]
    fn recurrence_id_is_utc_timestamp() {
        let mut event = event();
        event.recurrence_id = Some(at(2021, 5, 28, 10, 0, 6));

        let lines = event.timing_lines().unwrap();
        assert_eq!(lines.last().unwrap(), "RECURRENCE-ID:20210528T100006Z");
    }

    #[test]
    fn unknown_zone_fails() {
        let mut event = event();
        event.start = ZonedDate::new(at(2021, 5, 21, 10, 0, 6), "Nowhere/Special");
        assert!(matches!(
            event.timing_lines(),
            Err(RfcError::UnknownTimezone(_))
        ));
    }

    #[test]
    fn full_structured_location() {
        let mut event = event();
        event.location = Some(Location {
            title: "X".to_string(),
            address: Some("Y".to_string()),
            radius: Some(5.0),
            geo: Some(Geo { lat: 1.0, lon: 2.0 }),
        });

        let lines = lines(&event);
        assert_eq!(count(&lines, "LOCATION:"), 1);
        assert_eq!(count(&lines, "X-APPLE-STRUCTURED-LOCATION"), 1);
        assert_eq!(count(&lines, "GEO:"), 1);
        assert!(lines.contains(&"LOCATION:X\\nY".to_string()));
        assert!(lines.contains(
            &"X-APPLE-STRUCTURED-LOCATION;VALUE=URI;X-ADDRESS=Y;X-APPLE-RADIUS=5;X-TITLE=X:geo:1,2"
                .to_string()
        ));
        assert!(lines.contains(&"GEO:1;2".to_string()));
    }

    #[test]
    fn geo_without_radius() {
        let mut event = event();
        event.location = Some(Location {
            title: "Office".to_string(),
            address: Some("Main St".to_string()),
            radius: None,
            geo: Some(Geo {
                lat: 52.52,
                lon: 13.405,
            }),
        });

        let lines = lines(&event);
        assert!(lines.contains(&"LOCATION:Office".to_string()));
        assert!(lines.contains(&"GEO:52.52;13.405".to_string()));
        assert_eq!(count(&lines, "X-APPLE-STRUCTURED-LOCATION"), 0);
    }

    #[test]
    fn title_only_location() {
        let mut event = event();
        event.location = Some("X".into());

        let lines = lines(&event);
        assert_eq!(count(&lines, "LOCATION:"), 1);
        assert_eq!(count(&lines, "GEO:"), 0);
        assert_eq!(count(&lines, "X-APPLE-STRUCTURED-LOCATION"), 0);
    }

    #[test]
    fn empty_location_title_is_skipped() {
        let mut event = event();
        event.location = Some(Location::default());

        assert_eq!(count(&lines(&event), "LOCATION"), 0);
    }

    #[test]
    fn html_description() {
        let mut event = event();
        event.description = Some(Description::with_html("Hi, there", "<b>Hi</b>"));

        let lines = lines(&event);
        assert!(lines.contains(&"DESCRIPTION:Hi\\, there".to_string()));
        assert!(lines.contains(&"X-ALT-DESC;FMTTYPE=text/html:<b>Hi</b>".to_string()));
    }

    #[test]
    fn organizer_forms() {
        let mut event = event();

        event.organizer = Some(Organizer::Name("Jane; Doe".to_string()));
        assert!(lines(&event).contains(&"ORGANIZER;CN=\"Jane\\; Doe\"".to_string()));

        event.organizer = Some(Organizer::contact("Jane", Some("jane@example.com".to_string()), None).unwrap());
        assert!(lines(&event).contains(&"ORGANIZER;CN=\"Jane\":mailto:jane@example.com".to_string()));

        event.organizer = Some(
            Organizer::contact(
                "Jane",
                Some("jane@example.com".to_string()),
                Some("team@example.com".to_string()),
            )
            .unwrap(),
        );
        assert!(lines(&event).contains(
            &"ORGANIZER;CN=\"Jane\";EMAIL=jane@example.com:mailto:team@example.com".to_string()
        ));

        event.organizer = Some(Organizer::contact("Jane", None, Some("team@example.com".to_string())).unwrap());
        assert!(lines(&event).contains(&"ORGANIZER;CN=\"Jane\"".to_string()));
    }

    #[test]
    fn optional_properties_in_order() {
        let mut event = event();
        event.transparency = Some(Transparency::Opaque);
        event.url = Some("https://example.com".to_string());
        event.status = Some(EventStatus::Confirmed);
        event.busy_status = Some(BusyStatus::Busy);
        event.priority = Some(Priority::new(5).unwrap());
        event.created = Some(at(2021, 5, 1, 8, 0, 0));
        event.last_modified = Some(at(2021, 5, 2, 8, 0, 0));

        assert_eq!(
            event.detail_lines(),
            vec![
                "SUMMARY:Test",
                "TRANSP:OPAQUE",
                "URL;VALUE=URI:https://example.com",
                "STATUS:CONFIRMED",
                "X-MICROSOFT-CDO-BUSYSTATUS:BUSY",
                "PRIORITY:5",
                "CREATED:20210501T080000Z",
                "LAST-MODIFIED:20210502T080000Z",
            ]
        );
    }

    #[test]
    fn x_attributes_need_prefix() {
        let mut event = event();
        event.add_x_attribute("X-FOO", "a,b").unwrap();
        assert!(matches!(
            event.add_x_attribute("FOO", "bar"),
            Err(RfcError::InvalidCustomAttribute(ref key)) if key == "FOO"
        ));

        assert_eq!(event.x_attributes().len(), 1);
        assert_eq!(lines(&event).last().unwrap(), "X-FOO:a\\,b");
    }

    #[test]
    fn time_zones_start_then_end() {
        let mut event = event();
        event.end = Some(ZonedDate::new(at(2021, 5, 21, 11, 0, 0), "Europe/Berlin"));
        assert_eq!(event.time_zones(), vec!["America/Los_Angeles", "Europe/Berlin"]);

        event.end = Some(ZonedDate::new(at(2021, 5, 21, 11, 0, 0), "America/Los_Angeles"));
        assert_eq!(event.time_zones(), vec!["America/Los_Angeles"]);

        event.start = at(2021, 5, 21, 10, 0, 0).into();
        event.end = None;
        assert!(event.time_zones().is_empty());
    }

    #[test]
    fn missing_uid_fails_render_lines() {
        let mut event = event();
        event.uid.clear();
        assert!(matches!(
            event.emit_lines(Vec::new()),
            Err(RfcError::ValidationError(_))
        ));
    }
}
