//! Router for the events API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State, routing::get};
use chrono::Utc;

use crate::api::state::AppState;
use crate::calendar::{agenda, agenda::Agenda, feed, ical};

type SharedState = Arc<RwLock<AppState>>;

/// Always answers 200 with best-effort content: feed problems degrade
/// to a placeholder entry rather than an error the front-end would have
/// to handle.
async fn events_handler(State(state): State<SharedState>) -> Json<Agenda> {
    let (url, tz, client) = {
        let shared_state = state.read().unwrap();
        (
            shared_state.config.ical_url.clone(),
            shared_state.config.timezone,
            shared_state.http.clone(),
        )
    };

    if url.is_empty() {
        return Json(agenda::not_configured());
    }

    let now = Utc::now().with_timezone(&tz).naive_local();
    match feed::fetch_feed(&client, &url).await {
        Ok(raw) => Json(agenda::build_agenda(ical::parse_events(&raw, tz), now)),
        Err(err) => {
            tracing::warn!("Failed to load the calendar feed: {}", err);
            Json(agenda::load_error())
        }
    }
}

/// Create the events router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(events_handler))
}
