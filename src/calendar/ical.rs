//! Minimal iCalendar parser for the household feed.
//!
//! This is deliberately not a full RFC 5545 implementation. Only
//! `SUMMARY`, `DTSTART` and `DTEND` are understood; every other property
//! is ignored. Blocks without a parseable `DTSTART` are dropped silently
//! so one malformed entry can't take down the whole agenda.

use std::sync::LazyLock;

use chrono::{Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;

/// Shown when an event has no usable SUMMARY.
pub const UNTITLED: &str = "(Sans titre)";

static VEVENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)BEGIN:VEVENT(.*?)END:VEVENT").unwrap());

/// A normalized event straight out of the feed. Timestamps are in the
/// dashboard's local timezone; `Z`-suffixed feed values are converted
/// during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub summary: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
}

/// Parse every VEVENT in the raw feed text. Malformed blocks are skipped.
pub fn parse_events(raw: &str, tz: Tz) -> Vec<CalendarEvent> {
    let unfolded = unfold(raw);
    VEVENT_RE
        .captures_iter(&unfolded)
        .filter_map(|caps| parse_block(caps.get(1).map(|m| m.as_str())?, tz))
        .collect()
}

fn parse_block(block: &str, tz: Tz) -> Option<CalendarEvent> {
    // No DTSTART, no event.
    let (start, all_day) = property(block, "DTSTART").and_then(|v| parse_stamp(&v, tz))?;

    let summary = property(block, "SUMMARY")
        .map(|v| unescape(&v))
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    let end = property(block, "DTEND")
        .and_then(|v| parse_stamp(&v, tz))
        .map(|(end, _)| end)
        .unwrap_or_else(|| {
            if all_day {
                start + Duration::days(1)
            } else {
                start + Duration::hours(1)
            }
        });

    Some(CalendarEvent {
        summary,
        start,
        end,
        all_day,
    })
}

/// Extract the value of a named property, tolerating parameters
/// (`SUMMARY;LANGUAGE=fr:...`) and any ordering within the block.
fn property(block: &str, name: &str) -> Option<String> {
    for line in block.lines() {
        let line = line.trim_end_matches('\r');
        let Some(rest) = line.strip_prefix(name) else {
            continue;
        };
        match rest.as_bytes().first() {
            Some(b':') => return Some(rest[1..].to_string()),
            // Skip over property parameters up to the value separator
            Some(b';') => {
                if let Some(idx) = rest.find(':') {
                    return Some(rest[idx + 1..].to_string());
                }
            }
            // e.g. DTSTART matching the prefix of some longer name
            _ => continue,
        }
    }
    None
}

/// Parse a DTSTART/DTEND value. Exactly 8 digits is an all-day local
/// date, anything 15 chars or longer is treated as a datetime (with an
/// exact trailing `Z` meaning UTC), everything else is malformed.
fn parse_stamp(value: &str, tz: Tz) -> Option<(NaiveDateTime, bool)> {
    let value = value.trim();
    if value.len() == 8 {
        let date = NaiveDate::parse_from_str(value, "%Y%m%d").ok()?;
        Some((date.and_hms_opt(0, 0, 0)?, true))
    } else if value.len() >= 15 {
        let local = NaiveDateTime::parse_from_str(&value[..15], "%Y%m%dT%H%M%S").ok()?;
        if value.len() == 16 && value.ends_with('Z') {
            let utc = Utc.from_utc_datetime(&local);
            Some((utc.with_timezone(&tz).naive_local(), false))
        } else {
            Some((local, false))
        }
    } else {
        None
    }
}

/// Join soft-wrapped lines: a line break followed by a space or tab is a
/// continuation, not a real newline. Must run before unescaping.
fn unfold(raw: &str) -> String {
    raw.replace("\r\n ", "")
        .replace("\r\n\t", "")
        .replace("\n ", "")
        .replace("\n\t", "")
}

/// Undo iCalendar text escaping: `\n` -> newline, `\,` -> `,`,
/// `\;` -> `;`, `\\` -> `\`.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
