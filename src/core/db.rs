//! SQLite access for persisted dashboard state

use anyhow::Result;
use rusqlite::Connection;

/// Open an async connection to the dashboard database.
pub async fn async_db(db_path: &str) -> Result<tokio_rusqlite::Connection> {
    let db = tokio_rusqlite::Connection::open(db_path).await?;
    Ok(db)
}

/// Create the schema if it doesn't already exist. Safe to run on every
/// startup.
pub fn initialize_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content TEXT NOT NULL,
            author TEXT NOT NULL,
            created_at TEXT NOT NULL,
            expires_at TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}
