//! Content line folding for iCalendar (RFC 5545 §3.1).

use zonecal_core::constants::{CRLF, FOLD_WIDTH};

/// Folds a content line so that no physical line exceeds 75 octets.
///
/// Continuation lines are introduced by CRLF followed by a single space,
/// which counts against that line's 75 octets. Characters are never split,
/// so a multi-byte character that would cross the limit moves to the next
/// line as a whole.
#[must_use]
pub fn fold_line(line: &str) -> String {
    if line.len() <= FOLD_WIDTH {
        return line.to_string();
    }

    let mut result = String::with_capacity(line.len() + (line.len() / FOLD_WIDTH) * 3);
    let mut octets = 0;

    for ch in line.chars() {
        let size = ch.len_utf8();
        octets += size;
        if octets > FOLD_WIDTH {
            result.push_str(CRLF);
            result.push(' ');
            octets = 1 + size;
        }
        result.push(ch);
    }

    result
}

/// Joins content lines with CRLF, dropping absent and empty entries.
///
/// Order is preserved; nothing is deduplicated.
#[must_use]
pub fn join_and_filter<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let kept: Vec<S> = lines
        .into_iter()
        .flatten()
        .filter(|line| !line.as_ref().is_empty())
        .collect();

    let mut result = String::new();
    for (i, line) in kept.iter().enumerate() {
        if i > 0 {
            result.push_str(CRLF);
        }
        result.push_str(line.as_ref());
    }
    result
}
