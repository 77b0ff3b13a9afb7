//! Router for the admin API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State, routing::post};
use chrono::Utc;
use http::HeaderMap;
use serde_json::{Value, json};

use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::auth::ClientIp;

type SharedState = Arc<RwLock<AppState>>;

// PIN verification endpoint, used by the front-end before showing the
// admin panel
async fn verify_pin(
    State(state): State<SharedState>,
    ClientIp(ip): ClientIp,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let shared_state = state.read().unwrap();
    let now = Utc::now()
        .with_timezone(&shared_state.config.timezone)
        .naive_local();
    let pin = headers
        .get("x-admin-pin")
        .and_then(|value| value.to_str().ok());

    shared_state
        .gate
        .authorize(&ip, pin, now)
        .map_err(ApiError::from_auth)?;

    Ok(Json(json!({ "valid": true })))
}

/// Create the admin router
pub fn router() -> Router<SharedState> {
    Router::new().route("/verify", post(verify_pin))
}
