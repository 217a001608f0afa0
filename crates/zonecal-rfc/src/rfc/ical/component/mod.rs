//! iCalendar component tree (RFC 5545 §3.4-3.6).
//!
//! Every node renders as a `BEGIN:<TAG>` / `END:<TAG>` block. Rendering runs
//! in three steps per node:
//!
//! 1. gather the children for this pass (a hook; the calendar uses it to
//!    inject resolved `VTIMEZONE` blocks),
//! 2. emit the node's own property lines around the gathered children,
//! 3. render nested components recursively, fold every text line and join
//!    the result with CRLF.
//!
//! Sibling components are rendered concurrently, but output order always
//! follows the gathered order. Any error aborts the whole render.

use std::borrow::Cow;

use futures::FutureExt;
use futures::future::{self, BoxFuture, try_join_all};

use crate::error::RfcResult;
use crate::rfc::ical::build::{fold_line, join_and_filter};

mod calendar;
mod event;
mod timezone;


pub use calendar::{Calendar, ProdId};
pub use event::Event;
pub use timezone::TimeZone;

mod private {
    pub trait Sealed {}

    impl Sealed for super::Calendar {}
    impl Sealed for super::Event {}
    impl Sealed for super::TimeZone {}
    impl Sealed for super::Component {}
}

/// A node of the component tree.
#[derive(Debug, Clone)]
pub enum Component {
    Calendar(Calendar),
    Event(Event),
    TimeZone(TimeZone),
}

/// An entry in a component's child sequence.
#[derive(Debug, Clone)]
pub enum Child {
    Component(Component),
    /// A pre-formatted content line, emitted verbatim (folding still applies).
    Line(String),
}

/// An entry of the child list gathered for a single render pass.
///
/// Stored children are borrowed; entries synthesized during the pass (such
/// as resolved time zones) are owned by the pass.
#[derive(Debug, Clone)]
pub enum RenderItem<'a> {
    Line(Cow<'a, str>),
    Component(Cow<'a, Component>),
}

/// Rendering capabilities shared by every component kind.
pub trait Render: private::Sealed + Send + Sync {
    /// Tag used for the `BEGIN:` / `END:` lines.
    fn tag_name(&self) -> &'static str;

    /// Children stored on this component.
    fn children(&self) -> &[Child];

    /// Zone names this component depends on, deduplicated, in first-use order.
    fn time_zones(&self) -> Vec<String>;

    /// Returns the child list for one render pass.
    ///
    /// The default borrows the stored children unchanged.
    fn gather_children(&self) -> BoxFuture<'_, RfcResult<Vec<RenderItem<'_>>>> {
        let gathered = self.children().iter().map(RenderItem::from).collect();
        future::ready(Ok(gathered)).boxed()
    }

    /// ## Summary
    /// Produces this component's own lines, interleaved with the gathered
    /// children in output order.
    ///
    /// ## Errors
    /// Returns an error if a property value cannot be rendered.
    fn emit_lines<'a>(&'a self, gathered: Vec<RenderItem<'a>>) -> RfcResult<Vec<RenderItem<'a>>>;

    /// ## Summary
    /// Renders this component and all of its descendants.
    ///
    /// ## Errors
    /// Returns the first error raised while gathering children or rendering
    /// any line; no partial output is produced.
    fn render_to_string(&self) -> BoxFuture<'_, RfcResult<String>> {
        render_component(self).boxed()
    }

    /// ## Summary
    /// Renders on the current thread, blocking until the output is ready.
    ///
    /// Resolvers that need a specific async runtime must be driven through
    /// [`Render::render_to_string`] instead.
    ///
    /// ## Errors
    /// See [`Render::render_to_string`].
    fn render_blocking(&self) -> RfcResult<String> {
        futures::executor::block_on(self.render_to_string())
    }
}

async fn render_component<R: Render + ?Sized>(component: &R) -> RfcResult<String> {
    let tag = component.tag_name();
    tracing::debug!(tag, "Rendering component");

    let gathered = component.gather_children().await?;
    tracing::trace!(tag, count = gathered.len(), "Gathered children for render");

    let items = component.emit_lines(gathered)?;
    let rendered = try_join_all(items.into_iter().map(render_item)).await?;

    let begin = fold_line(&format!("BEGIN:{tag}"));
    let end = fold_line(&format!("END:{tag}"));

    let output = join_and_filter(
        std::iter::once(begin)
            .chain(rendered)
            .chain(std::iter::once(end))
            .map(Some),
    );

    tracing::debug!(tag, bytes = output.len(), "Component rendered");
    Ok(output)
}

async fn render_item(item: RenderItem<'_>) -> RfcResult<String> {
    match item {
        RenderItem::Line(line) => Ok(fold_line(line.trim_end())),
        RenderItem::Component(component) => component.render_to_string().await,
    }
}

/// Appends `zone` unless it is empty or already present.
pub(crate) fn push_zone(zones: &mut Vec<String>, zone: &str) {
    if !zone.is_empty() && !zones.iter().any(|known| known == zone) {
        zones.push(zone.to_string());
    }
}

impl Render for Component {
    fn tag_name(&self) -> &'static str {
        match self {
            Self::Calendar(calendar) => calendar.tag_name(),
            Self::Event(event) => event.tag_name(),
            Self::TimeZone(timezone) => timezone.tag_name(),
        }
    }

    fn children(&self) -> &[Child] {
        match self {
            Self::Calendar(calendar) => calendar.children(),
            Self::Event(event) => event.children(),
            Self::TimeZone(timezone) => timezone.children(),
        }
    }

    fn time_zones(&self) -> Vec<String> {
        match self {
            Self::Calendar(calendar) => calendar.time_zones(),
            Self::Event(event) => event.time_zones(),
            Self::TimeZone(timezone) => timezone.time_zones(),
        }
    }

    fn gather_children(&self) -> BoxFuture<'_, RfcResult<Vec<RenderItem<'_>>>> {
        match self {
            Self::Calendar(calendar) => calendar.gather_children(),
            Self::Event(event) => event.gather_children(),
            Self::TimeZone(timezone) => timezone.gather_children(),
        }
    }

    fn emit_lines<'a>(&'a self, gathered: Vec<RenderItem<'a>>) -> RfcResult<Vec<RenderItem<'a>>> {
        match self {
            Self::Calendar(calendar) => calendar.emit_lines(gathered),
            Self::Event(event) => event.emit_lines(gathered),
            Self::TimeZone(timezone) => timezone.emit_lines(gathered),
        }
    }
}

impl From<Calendar> for Component {
    fn from(calendar: Calendar) -> Self {
        Self::Calendar(calendar)
    }
}

impl From<Event> for Component {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

impl From<TimeZone> for Component {
    fn from(timezone: TimeZone) -> Self {
        Self::TimeZone(timezone)
    }
}

impl From<Component> for Child {
    fn from(component: Component) -> Self {
        Self::Component(component)
    }
}

impl From<Event> for Child {
    fn from(event: Event) -> Self {
        Self::Component(event.into())
    }
}

impl From<TimeZone> for Child {
    fn from(timezone: TimeZone) -> Self {
        Self::Component(timezone.into())
    }
}

impl From<Calendar> for Child {
    fn from(calendar: Calendar) -> Self {
        Self::Component(calendar.into())
    }
}

impl From<String> for Child {
    fn from(line: String) -> Self {
        Self::Line(line)
    }
}

impl From<&str> for Child {
    fn from(line: &str) -> Self {
        Self::Line(line.to_string())
    }
}

impl<'a> From<&'a Child> for RenderItem<'a> {
    fn from(child: &'a Child) -> Self {
        match child {
            Child::Component(component) => Self::Component(Cow::Borrowed(component)),
            Child::Line(line) => Self::Line(Cow::Borrowed(line)),
        }
    }
}

impl From<String> for RenderItem<'_> {
    fn from(line: String) -> Self {
        Self::Line(Cow::Owned(line))
    }
}

impl From<Component> for RenderItem<'_> {
    fn from(component: Component) -> Self {
        Self::Component(Cow::Owned(component))
    }
}
