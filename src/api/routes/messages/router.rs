//! Router for the messages API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::{NaiveDateTime, Utc};
use http::{HeaderMap, StatusCode};
use serde_json::{Value, json};

use super::db as messages_db;
use super::public::{CreateMessageRequest, MessageResponse};
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::auth::ClientIp;

type SharedState = Arc<RwLock<AppState>>;

fn admin_pin(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-admin-pin")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Run the gate for a mutating request, then hand back what the
/// handler needs once the state lock is released.
fn authorize(
    state: &SharedState,
    ip: &str,
    headers: &HeaderMap,
) -> Result<(tokio_rusqlite::Connection, NaiveDateTime), ApiError> {
    let shared_state = state.read().unwrap();
    let now = Utc::now()
        .with_timezone(&shared_state.config.timezone)
        .naive_local();
    shared_state
        .gate
        .authorize(ip, admin_pin(headers).as_deref(), now)
        .map_err(ApiError::from_auth)?;
    Ok((shared_state.db.clone(), now))
}

fn to_response(message: messages_db::Message, now: NaiveDateTime) -> MessageResponse {
    MessageResponse {
        id: message.id,
        content: message.content,
        author: message.author,
        time_ago: messages_db::time_ago(message.created_at, now),
        created_at: message.created_at,
        expires_at: message.expires_at,
    }
}

// List active messages endpoint (no auth, the display polls this)
async fn list_messages(
    State(state): State<SharedState>,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    let (db, tz) = {
        let shared_state = state.read().unwrap();
        (shared_state.db.clone(), shared_state.config.timezone)
    };
    let now = Utc::now().with_timezone(&tz).naive_local();

    let messages = messages_db::list_active(&db, now).await?;
    let resp = messages
        .into_iter()
        .map(|message| to_response(message, now))
        .collect();
    Ok(Json(resp))
}

// Create message endpoint (admin only)
async fn create_message(
    State(state): State<SharedState>,
    ClientIp(ip): ClientIp,
    headers: HeaderMap,
    Json(req): Json<CreateMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let (db, now) = authorize(&state, &ip, &headers)?;

    // Check-then-insert; the race window is accepted at this volume
    if messages_db::count_active(&db, now).await? >= messages_db::MAX_ACTIVE_MESSAGES {
        return Err(ApiError::CapacityExceeded);
    }

    let expires_in_hours = req
        .expires_in_hours
        .unwrap_or(messages_db::DEFAULT_EXPIRY_HOURS);
    // A message must expire strictly after its creation, and the window
    // has to stay within what the datetime arithmetic can hold
    if !(1..=messages_db::MAX_EXPIRY_HOURS).contains(&expires_in_hours) {
        return Err(ApiError::BadRequest(
            "Durée d'expiration invalide".to_string(),
        ));
    }
    let message = messages_db::insert(&db, req.content, req.author, expires_in_hours, now).await?;

    Ok((StatusCode::CREATED, Json(to_response(message, now))))
}

// Delete message endpoint (admin only)
async fn delete_message(
    State(state): State<SharedState>,
    ClientIp(ip): ClientIp,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let (db, _now) = authorize(&state, &ip, &headers)?;

    if !messages_db::delete(&db, id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(Json(json!({ "success": true })))
}

/// Create the messages router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_messages).post(create_message))
        .route("/{id}", axum::routing::delete(delete_message))
}
