//! `VTIMEZONE` component (RFC 5545 §3.6.5).

use super::{Child, Render, RenderItem};
use crate::error::RfcResult;

const BEGIN_LINE: &str = "BEGIN:VTIMEZONE";
const END_LINE: &str = "END:VTIMEZONE";

/// A time zone definition carried as pre-rendered content lines.
///
/// The lines are the body of the block; `BEGIN:VTIMEZONE` and
/// `END:VTIMEZONE` are added on render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeZone {
    lines: Vec<String>,
}

impl TimeZone {
    /// Splits a newline-delimited body into lines.
    #[must_use]
    pub fn from_string(body: &str) -> Self {
        Self::from_lines(body.split('\n'))
    }

    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lines: lines
                .into_iter()
                .map(|line| line.as_ref().trim_end().to_string())
                .collect(),
        }
    }

    /// Like [`TimeZone::from_string`], but drops an enclosing
    /// `BEGIN:VTIMEZONE` / `END:VTIMEZONE` pair and blank edge lines.
    ///
    /// Zone providers commonly hand out complete blocks.
    #[must_use]
    pub fn from_block(block: &str) -> Self {
        let mut lines: Vec<&str> = block.lines().map(str::trim_end).collect();

        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        let start = lines.iter().position(|line| !line.is_empty()).unwrap_or(lines.len());
        let mut body = &lines[start..];

        if body.first() == Some(&BEGIN_LINE) && body.last() == Some(&END_LINE) && body.len() >= 2 {
            body = &body[1..body.len() - 1];
        }

        Self::from_lines(body)
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(String::is_empty)
    }
}

impl Render for TimeZone {
    fn tag_name(&self) -> &'static str {
        "VTIMEZONE"
    }

    fn children(&self) -> &[Child] {
        &[]
    }

    fn time_zones(&self) -> Vec<String> {
        Vec::new()
    }

    fn emit_lines<'a>(&'a self, gathered: Vec<RenderItem<'a>>) -> RfcResult<Vec<RenderItem<'a>>> {
        let mut items: Vec<RenderItem<'a>> = self
            .lines
            .iter()
            .map(|line| RenderItem::Line(line.as_str().into()))
            .collect();
        items.extend(gathered);
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_trims_line_ends() {
        let tz = TimeZone::from_string("TZID:Europe/Berlin \r\nX-LIC-LOCATION:Europe/Berlin\r");
        assert_eq!(tz.lines(), ["TZID:Europe/Berlin", "X-LIC-LOCATION:Europe/Berlin"]);
    }

    #[test]
    fn from_block_strips_wrapper() {
        let tz = TimeZone::from_block(
            "\nBEGIN:VTIMEZONE\r\nTZID:Europe/Paris\r\nEND:VTIMEZONE\r\n\r\n",
        );
        assert_eq!(tz.lines(), ["TZID:Europe/Paris"]);
    }

    #[test]
    fn from_block_keeps_bare_body() {
        let tz = TimeZone::from_block("TZID:Europe/Paris\nBEGIN:STANDARD\nEND:STANDARD");
        assert_eq!(tz.lines().len(), 3);
    }

    #[test]
    fn has_no_zone_dependencies() {
        let tz = TimeZone::from_string("TZID:Europe/Paris");
        assert!(tz.time_zones().is_empty());
        assert!(tz.children().is_empty());
    }

    #[test]
    fn blank_body_is_empty() {
        assert!(TimeZone::from_block("\n\n").is_empty());
        assert!(!TimeZone::from_string("TZID:UTC").is_empty());
    }

    #[test]
    fn renders_lines_verbatim() {
        let tz = TimeZone::from_lines(["TZID:Europe/Berlin", "X-LIC-LOCATION:Europe/Berlin"]);
        assert_eq!(
            tz.render_blocking().unwrap(),
            "BEGIN:VTIMEZONE\r\nTZID:Europe/Berlin\r\nX-LIC-LOCATION:Europe/Berlin\r\nEND:VTIMEZONE"
        );
    }
}
