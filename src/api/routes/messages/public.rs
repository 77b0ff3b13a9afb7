//! Public types for the messages API
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: i64,
    pub content: String,
    pub author: String,
    pub created_at: NaiveDateTime,
    pub expires_at: NaiveDateTime,
    /// Derived display string, e.g. "Il y a 5 min"
    pub time_ago: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub content: String,
    pub author: String,
    /// Defaults to 24 hours when omitted
    pub expires_in_hours: Option<i64>,
}
