//! `VCALENDAR` component (RFC 5545 §3.4).

use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use zonecal_core::constants::{
    DEFAULT_CALSCALE, DEFAULT_PRODID_COMPANY, DEFAULT_PRODID_LANGUAGE, DEFAULT_PRODID_PRODUCT,
    EXTENSION_PREFIX, ICALENDAR_VERSION, UTC_ZONE,
};

use super::{Child, Component, Event, Render, RenderItem, TimeZone, push_zone};
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::build::escape_text;
use crate::rfc::ical::core::{Method, to_duration};
use crate::rfc::ical::resolver::TimeZoneResolver;

/// Product identifier rendered as `-//company//product//language`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProdId {
    pub company: String,
    pub product: String,
    pub language: String,
}

impl ProdId {
    #[must_use]
    pub fn new(
        company: impl Into<String>,
        product: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            product: product.into(),
            language: language.into(),
        }
    }
}

impl Default for ProdId {
    fn default() -> Self {
        Self::new(
            DEFAULT_PRODID_COMPANY,
            DEFAULT_PRODID_PRODUCT,
            DEFAULT_PRODID_LANGUAGE,
        )
    }
}

impl fmt::Display for ProdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-//{}//{}//{}", self.company, self.product, self.language)
    }
}

/// Root of an iCalendar document.
///
/// With a [`TimeZoneResolver`] attached, every render embeds a `VTIMEZONE`
/// block for each non-UTC zone used by the calendar or its events. Zones the
/// resolver cannot provide are left out.
#[derive(Clone, Default)]
pub struct Calendar {
    pub prod_id: ProdId,
    pub method: Option<Method>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    /// Suggested refresh interval in seconds.
    pub ttl: Option<u64>,
    /// Default zone name, emitted as `TIMEZONE-ID` / `X-WR-TIMEZONE`.
    pub timezone: Option<String>,
    pub children: Vec<Child>,
    /// Pre-formatted lines emitted after all children.
    pub custom_lines: Vec<String>,
    resolver: Option<Arc<dyn TimeZoneResolver>>,
}

impl fmt::Debug for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calendar")
            .field("prod_id", &self.prod_id)
            .field("method", &self.method)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("url", &self.url)
            .field("ttl", &self.ttl)
            .field("timezone", &self.timezone)
            .field("children", &self.children)
            .field("custom_lines", &self.custom_lines)
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}

impl Calendar {
    #[must_use]
    pub fn new(prod_id: ProdId) -> Self {
        Self {
            prod_id,
            ..Self::default()
        }
    }

    /// Creates a calendar that embeds resolved `VTIMEZONE` blocks on render.
    #[must_use]
    pub fn with_zones(prod_id: ProdId, resolver: impl TimeZoneResolver + 'static) -> Self {
        let mut calendar = Self::new(prod_id);
        calendar.set_resolver(Arc::new(resolver));
        calendar
    }

    pub fn set_resolver(&mut self, resolver: Arc<dyn TimeZoneResolver>) -> &mut Self {
        self.resolver = Some(resolver);
        self
    }

    #[must_use]
    pub fn resolver(&self) -> Option<&Arc<dyn TimeZoneResolver>> {
        self.resolver.as_ref()
    }

    pub fn add_child(&mut self, child: impl Into<Child>) -> &mut Self {
        self.children.push(child.into());
        self
    }

    pub fn add_event(&mut self, event: Event) -> &mut Self {
        self.add_child(event)
    }

    pub fn clear_children(&mut self) -> &mut Self {
        self.children.clear();
        self
    }

    /// Appends a raw line, emitted verbatim after the children.
    pub fn add_custom_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.custom_lines.push(line.into());
        self
    }

    /// ## Summary
    /// Appends `KEY:value`, escaping the value when `escape` is set.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidCustomAttribute` if `key` lacks the `X-` prefix.
    pub fn add_custom_attribute(
        &mut self,
        key: &str,
        value: &str,
        escape: bool,
    ) -> RfcResult<&mut Self> {
        if !key.starts_with(EXTENSION_PREFIX) {
            return Err(RfcError::InvalidCustomAttribute(key.to_string()));
        }
        let value = if escape {
            escape_text(value)
        } else {
            value.to_string()
        };
        Ok(self.add_custom_line(format!("{key}:{value}")))
    }

    /// Resolves every non-UTC zone concurrently, keeping zone-set order and
    /// dropping the ones that fail or come back empty.
    async fn resolve_zones(&self, resolver: &dyn TimeZoneResolver) -> Vec<TimeZone> {
        let zones: Vec<String> = self
            .time_zones()
            .into_iter()
            .filter(|zone| zone != UTC_ZONE)
            .collect();
        tracing::debug!(count = zones.len(), "Resolving time zones for calendar");

        let results = join_all(zones.iter().map(|tzid| resolver.resolve(tzid))).await;

        let mut resolved = Vec::with_capacity(zones.len());
        for (tzid, result) in zones.iter().zip(results) {
            match result {
                Ok(Some(timezone)) if !timezone.is_empty() => resolved.push(timezone),
                Ok(_) => {
                    tracing::debug!(tzid = %tzid, "No time zone definition available, skipping");
                }
                Err(error) => {
                    tracing::debug!(tzid = %tzid, error = %error, "Time zone resolution failed, skipping");
                }
            }
        }
        resolved
    }

    fn property_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("PRODID:{}", self.prod_id),
            format!("VERSION:{ICALENDAR_VERSION}"),
            format!("CALSCALE:{DEFAULT_CALSCALE}"),
        ];

        if let Some(url) = &self.url {
            lines.push(format!("URL:{url}"));
        }

        if let Some(method) = self.method {
            lines.push(format!("METHOD:{method}"));
        }

        if let Some(description) = &self.description {
            lines.push(format!("X-WR-CALDESC:{}", escape_text(description)));
        }

        if let Some(name) = &self.name {
            let name = escape_text(name);
            lines.push(format!("NAME:{name}"));
            lines.push(format!("X-WR-CALNAME:{name}"));
        }

        if let Some(ttl) = self.ttl.filter(|ttl| *ttl > 0) {
            let duration = to_duration(i64::try_from(ttl).unwrap_or(i64::MAX));
            lines.push(format!("REFRESH-INTERVAL;VALUE=DURATION:{duration}"));
            lines.push(format!("X-PUBLISHED-TTL:{duration}"));
        }

        if let Some(timezone) = &self.timezone {
            lines.push(format!("TIMEZONE-ID:{timezone}"));
            lines.push(format!("X-WR-TIMEZONE:{timezone}"));
        }

        lines
    }
}

impl Render for Calendar {
    fn tag_name(&self) -> &'static str {
        "VCALENDAR"
    }

    fn children(&self) -> &[Child] {
        &self.children
    }

    /// Own zone first, then the zones of component children in child order.
    fn time_zones(&self) -> Vec<String> {
        let mut zones = Vec::new();
        if let Some(timezone) = &self.timezone {
            push_zone(&mut zones, timezone);
        }
        for child in &self.children {
            if let Child::Component(component) = child {
                for zone in component.time_zones() {
                    push_zone(&mut zones, &zone);
                }
            }
        }
        zones
    }

    fn gather_children(&self) -> BoxFuture<'_, RfcResult<Vec<RenderItem<'_>>>> {
        async move {
            let mut gathered: Vec<RenderItem<'_>> = Vec::with_capacity(self.children.len());
            if let Some(resolver) = &self.resolver {
                let zones = self.resolve_zones(resolver.as_ref()).await;
                gathered.extend(
                    zones
                        .into_iter()
                        .map(|timezone| RenderItem::from(Component::from(timezone))),
                );
            }
            gathered.extend(self.children.iter().map(RenderItem::from));
            Ok(gathered)
        }
        .boxed()
    }

    fn emit_lines<'a>(&'a self, gathered: Vec<RenderItem<'a>>) -> RfcResult<Vec<RenderItem<'a>>> {
        let mut items: Vec<RenderItem<'a>> =
            self.property_lines().into_iter().map(RenderItem::from).collect();
        items.extend(gathered);
        items.extend(
            self.custom_lines
                .iter()
                .map(|line| RenderItem::Line(line.as_str().into())),
        );
        Ok(items)
    }
}
