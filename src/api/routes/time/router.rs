//! Router for the time API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Locale, Timelike, Utc};
use chrono_tz::Tz;

use super::public::TimeResponse;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn time_handler(State(state): State<SharedState>) -> Json<TimeResponse> {
    let (tz, dev_mode) = {
        let shared_state = state.read().unwrap();
        (shared_state.config.timezone, shared_state.config.dev_mode)
    };
    let now = Utc::now().with_timezone(&tz);
    Json(build_time_response(now, dev_mode))
}

fn build_time_response(now: DateTime<Tz>, dev_mode: bool) -> TimeResponse {
    let hour = now.hour();
    TimeResponse {
        date: now
            .format_localized("%A %-d %B %Y", Locale::fr_FR)
            .to_string(),
        time: now.format("%Hh%M").to_string(),
        moment: moment_label(hour).to_string(),
        is_dark_mode: is_dark_mode(hour),
        dev_mode,
    }
}

fn moment_label(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Matin",
        12..=17 => "Après-midi",
        18..=21 => "Soir",
        _ => "Nuit",
    }
}

// The display dims in the evening and overnight
fn is_dark_mode(hour: u32) -> bool {
    hour >= 20 || hour < 7
}

/// Create the time router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(time_handler))
}
