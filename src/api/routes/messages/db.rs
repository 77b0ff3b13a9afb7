//! Database queries for the messages API.
//!
//! Expiry is evaluated lazily at read time by comparing `expires_at`
//! against the caller-provided clock; there is no background sweep.
//! Expired rows stay in the table until an admin deletes them.

use anyhow::Result;
use chrono::{Duration, NaiveDateTime};
use tokio_rusqlite::Connection;

/// At most this many unexpired messages may exist at creation time.
pub const MAX_ACTIVE_MESSAGES: i64 = 3;

/// Applied when the request omits `expiresInHours`.
pub const DEFAULT_EXPIRY_HOURS: i64 = 24;

/// Upper bound on a requested expiry window. Anything above a year is a
/// typo or an attempt to overflow the datetime arithmetic.
pub const MAX_EXPIRY_HOURS: i64 = 24 * 365;

// Stored format; lexicographic order matches chronological order so
// expiry comparisons can happen in SQL.
const DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub content: String,
    pub author: String,
    pub created_at: NaiveDateTime,
    pub expires_at: NaiveDateTime,
}

fn encode(ts: NaiveDateTime) -> String {
    ts.format(DATETIME_FMT).to_string()
}

fn decode(raw: &str) -> Result<NaiveDateTime> {
    Ok(NaiveDateTime::parse_from_str(raw, DATETIME_FMT)?)
}

/// Unexpired messages, newest first, truncated to [`MAX_ACTIVE_MESSAGES`].
pub async fn list_active(db: &Connection, now: NaiveDateTime) -> Result<Vec<Message>> {
    let now_s = encode(now);
    let rows: Vec<(i64, String, String, String, String)> = db
        .call(move |conn| {
            let mut stmt = conn.prepare(
                r"
          SELECT
            id,
            content,
            author,
            created_at,
            expires_at
          FROM messages
          WHERE expires_at > ?1
          ORDER BY created_at DESC
          LIMIT ?2
        ",
            )?;
            let rows = stmt
                .query_map((now_s, MAX_ACTIVE_MESSAGES), |i| {
                    Ok((i.get(0)?, i.get(1)?, i.get(2)?, i.get(3)?, i.get(4)?))
                })?
                .filter_map(Result::ok)
                .collect();
            Ok(rows)
        })
        .await?;

    rows.into_iter()
        .map(|(id, content, author, created_at, expires_at)| {
            Ok(Message {
                id,
                content,
                author,
                created_at: decode(&created_at)?,
                expires_at: decode(&expires_at)?,
            })
        })
        .collect()
}

/// Number of unexpired messages, used for the creation cap.
pub async fn count_active(db: &Connection, now: NaiveDateTime) -> Result<i64> {
    let now_s = encode(now);
    let count = db
        .call(move |conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM messages WHERE expires_at > ?1",
                [now_s],
                |i| i.get(0),
            )?;
            Ok(count)
        })
        .await?;
    Ok(count)
}

/// Insert a new message. The capacity cap is the caller's concern; the
/// check-then-insert race is tolerated at household request volume.
pub async fn insert(
    db: &Connection,
    content: String,
    author: String,
    expires_in_hours: i64,
    now: NaiveDateTime,
) -> Result<Message> {
    let created_at = now;
    let expires_at = now + Duration::hours(expires_in_hours);
    let (created_s, expires_s) = (encode(created_at), encode(expires_at));
    let (content_row, author_row) = (content.clone(), author.clone());

    let id = db
        .call(move |conn| {
            conn.execute(
                "INSERT INTO messages (content, author, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
                (content_row, author_row, created_s, expires_s),
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await?;

    Ok(Message {
        id,
        content,
        author,
        created_at,
        expires_at,
    })
}

/// Hard delete. Returns false when no row matched the id.
pub async fn delete(db: &Connection, id: i64) -> Result<bool> {
    let affected = db
        .call(move |conn| {
            let affected = conn.execute("DELETE FROM messages WHERE id = ?1", [id])?;
            Ok(affected)
        })
        .await?;
    Ok(affected > 0)
}

/// Human-readable age of a message. Integer truncation, not rounding.
pub fn time_ago(created_at: NaiveDateTime, now: NaiveDateTime) -> String {
    let span = now - created_at;
    if span.num_minutes() < 1 {
        "À l'instant".to_string()
    } else if span.num_minutes() < 60 {
        format!("Il y a {} min", span.num_minutes())
    } else if span.num_hours() < 24 {
        format!("Il y a {}h", span.num_hours())
    } else {
        format!("Il y a {} jour(s)", span.num_days())
    }
}
