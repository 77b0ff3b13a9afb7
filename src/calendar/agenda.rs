//! Buckets parsed feed events into the two-day view the front-end shows.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use super::ical::CalendarEvent;

/// Time label for events without a time-of-day component.
pub const ALL_DAY_LABEL: &str = "Journée";

const PLACEHOLDER_TIME: &str = "⚠️";
const NOT_CONFIGURED: &str = "Calendrier non configuré";
const LOAD_ERROR: &str = "Impossible de charger le calendrier";

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgendaEntry {
    pub time: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_past: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_ongoing: Option<bool>,
}

#[derive(Debug, Default, Serialize)]
pub struct Agenda {
    pub today: Vec<AgendaEntry>,
    pub tomorrow: Vec<AgendaEntry>,
}

/// Split events into today/tomorrow buckets, ordered by start time.
/// Events on any other date are dropped. The past/ongoing flags are only
/// computed for timed events happening today.
pub fn build_agenda(mut events: Vec<CalendarEvent>, now: NaiveDateTime) -> Agenda {
    events.sort_by_key(|event| event.start);

    let today = now.date();
    let tomorrow = today + Duration::days(1);

    let mut agenda = Agenda::default();
    for event in events {
        let date = event.start.date();
        if date == today {
            agenda.today.push(entry(&event, Some(now)));
        } else if date == tomorrow {
            agenda.tomorrow.push(entry(&event, None));
        }
    }
    agenda
}

/// Agenda shown when no feed URL is configured.
pub fn not_configured() -> Agenda {
    placeholder(NOT_CONFIGURED)
}

/// Agenda shown when the feed could not be fetched or parsed.
pub fn load_error() -> Agenda {
    placeholder(LOAD_ERROR)
}

fn placeholder(title: &str) -> Agenda {
    Agenda {
        today: vec![AgendaEntry {
            time: PLACEHOLDER_TIME.to_string(),
            title: title.to_string(),
            is_past: None,
            is_ongoing: None,
        }],
        tomorrow: vec![],
    }
}

fn entry(event: &CalendarEvent, now: Option<NaiveDateTime>) -> AgendaEntry {
    let time = if event.all_day {
        ALL_DAY_LABEL.to_string()
    } else {
        event.start.format("%Hh%M").to_string()
    };

    // All-day events never carry the flags
    let (is_past, is_ongoing) = match now {
        Some(now) if !event.all_day => (
            Some(now > event.end),
            Some(event.start <= now && now <= event.end),
        ),
        _ => (None, None),
    };

    AgendaEntry {
        time,
        title: event.summary.clone(),
        is_past,
        is_ongoing,
    }
}
