//! API routes module

pub mod admin;
pub mod events;
pub mod messages;
pub mod time;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Clock and date for the header
        .nest("/time", time::router())
        // Two-day calendar view
        .nest("/events", events::router())
        // Admin-posted messages
        .nest("/messages", messages::router())
        // Admin PIN verification
        .nest("/admin", admin::router())
}
